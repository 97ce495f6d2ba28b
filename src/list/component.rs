//! Flight list
//!
//! Renders the top-N records of one dimension grouped by calendar day.
//! Nodes live in an arena and are matched across renders by key: the day
//! for groups, the record identity for rows. Position never decides reuse,
//! so a record that moves within the top-N keeps its node.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::arena::{Arena, NodeId};
use super::format::{format_change, format_day, format_number, format_time};
use crate::index::{DimensionId, FilterIndex, IndexResult};
use crate::record::{Record, RecordId};

/// Default number of records shown
pub const DEFAULT_LIST_LIMIT: usize = 40;

/// One flight's row cells, fixed when the node is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRow {
    pub identity: RecordId,
    pub time: String,
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub delay: String,
    /// Negative delay
    pub early: bool,
}

impl FlightRow {
    fn from_record(record: &Record) -> Self {
        Self {
            identity: record.identity,
            time: format_time(record.timestamp),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            distance: format!("{} mi.", format_number(record.distance)),
            delay: format!("{} min.", format_change(record.delay_minutes)),
            early: record.delay_minutes < 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListNode {
    Day { key: NaiveDate, header: String },
    Flight(FlightRow),
}

/// Node counts touched by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub days_created: usize,
    pub days_reused: usize,
    pub days_removed: usize,
    pub rows_created: usize,
    pub rows_reused: usize,
    pub rows_removed: usize,
}

#[derive(Debug, Clone)]
struct DayEntry {
    key: NaiveDate,
    node: NodeId,
    rows: Vec<(RecordId, NodeId)>,
}

/// Rendered day group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub node: NodeId,
    pub header: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub node: NodeId,
    #[serde(flatten)]
    pub row: FlightRow,
}

#[derive(Debug)]
pub struct ListComponent {
    dimension: DimensionId,
    limit: usize,
    nodes: Arena<ListNode>,
    days: Vec<DayEntry>,
    renders: u64,
    last: ReconcileStats,
}

impl ListComponent {
    pub fn new(dimension: DimensionId, limit: usize) -> Self {
        Self {
            dimension,
            limit,
            nodes: Arena::new(),
            days: Vec::new(),
            renders: 0,
            last: ReconcileStats::default(),
        }
    }

    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Stats of the most recent render
    pub fn last_stats(&self) -> ReconcileStats {
        self.last
    }

    /// Live nodes, headers and rows together
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node currently showing `id`, if listed
    pub fn node_of(&self, id: RecordId) -> Option<NodeId> {
        self.days
            .iter()
            .flat_map(|day| day.rows.iter())
            .find(|(rid, _)| *rid == id)
            .map(|(_, node)| *node)
    }

    /// Node of a day header, if listed
    pub fn day_node(&self, key: NaiveDate) -> Option<NodeId> {
        self.days.iter().find(|d| d.key == key).map(|d| d.node)
    }

    /// Listed identities in display order
    pub fn identities(&self) -> Vec<RecordId> {
        self.days
            .iter()
            .flat_map(|day| day.rows.iter().map(|(id, _)| *id))
            .collect()
    }

    /// Recompute the top-N and reconcile nodes against the previous render.
    pub fn render<I: FilterIndex + ?Sized>(&mut self, index: &I) -> IndexResult<ReconcileStats> {
        let top = index.top(self.dimension, self.limit)?;

        // Group by day in the order the dimension yields records
        let mut grouped: Vec<(NaiveDate, Vec<&Record>)> = Vec::new();
        for record in top.into_iter().filter_map(|id| index.record(id)) {
            let key = record.day();
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, records)) => records.push(record),
                None => grouped.push((key, vec![record])),
            }
        }

        let mut stats = ReconcileStats::default();
        let mut previous: HashMap<NaiveDate, DayEntry> =
            self.days.drain(..).map(|day| (day.key, day)).collect();

        let mut days = Vec::with_capacity(grouped.len());
        for (key, records) in grouped {
            let (node, mut old_rows) = match previous.remove(&key) {
                Some(entry) => {
                    stats.days_reused += 1;
                    (entry.node, entry.rows.into_iter().collect::<HashMap<_, _>>())
                }
                None => {
                    stats.days_created += 1;
                    let header = format_day(key);
                    (self.nodes.insert(ListNode::Day { key, header }), HashMap::new())
                }
            };

            let mut rows = Vec::with_capacity(records.len());
            for record in records {
                let row_node = match old_rows.remove(&record.identity) {
                    Some(existing) => {
                        stats.rows_reused += 1;
                        existing
                    }
                    None => {
                        stats.rows_created += 1;
                        self.nodes.insert(ListNode::Flight(FlightRow::from_record(record)))
                    }
                };
                rows.push((record.identity, row_node));
            }

            for (_, stale) in old_rows {
                self.nodes.remove(stale);
                stats.rows_removed += 1;
            }
            days.push(DayEntry { key, node, rows });
        }

        for (_, entry) in previous {
            for (_, stale) in entry.rows {
                self.nodes.remove(stale);
                stats.rows_removed += 1;
            }
            self.nodes.remove(entry.node);
            stats.days_removed += 1;
        }

        self.days = days;
        self.renders += 1;
        self.last = stats;
        debug!(
            days = self.days.len(),
            rows_created = stats.rows_created,
            rows_reused = stats.rows_reused,
            rows_removed = stats.rows_removed,
            "list reconciled"
        );
        Ok(stats)
    }

    /// Current presentation in display order
    pub fn view(&self) -> Vec<DayView> {
        self.days
            .iter()
            .filter_map(|day| {
                let header = match self.nodes.get(day.node)? {
                    ListNode::Day { header, .. } => header.clone(),
                    ListNode::Flight(_) => return None,
                };
                let rows = day
                    .rows
                    .iter()
                    .filter_map(|(_, node)| match self.nodes.get(*node)? {
                        ListNode::Flight(row) => Some(RowView {
                            node: *node,
                            row: row.clone(),
                        }),
                        ListNode::Day { .. } => None,
                    })
                    .collect();
                Some(DayView {
                    node: day.node,
                    header,
                    rows,
                })
            })
            .collect()
    }
}
