//! Event and staffing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::CostBreakdown;
use crate::types::GuestCount;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Lifecycle status of an event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planned,
    Completed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Planned => write!(f, "Planned"),
            EventStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A staff member booked for an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    pub id: Uuid,
    pub role: String,
    /// Flat cost for the whole event
    pub cost: Decimal,
}

impl StaffMember {
    pub fn new(role: impl Into<String>, cost: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: role.into(),
            cost,
        }
    }
}

/// A catered event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    pub num_adults: u32,
    pub num_children: u32,
    pub selected_drink_ids: Vec<Uuid>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    /// Cost breakdown captured when the event was saved from a simulation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated_costs: Option<CostBreakdown>,
}

impl Event {
    /// A new event in the planned state
    pub fn planned(
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        guests: GuestCount,
        selected_drink_ids: Vec<Uuid>,
        staff: Vec<StaffMember>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_time,
            end_time,
            status: EventStatus::Planned,
            num_adults: guests.adults,
            num_children: guests.children,
            selected_drink_ids,
            staff,
            simulated_costs: None,
        }
    }

    pub fn guests(&self) -> GuestCount {
        GuestCount::new(self.num_adults, self.num_children)
    }

    /// Length of the event in hours; zero or negative when the times are inverted
    pub fn duration_hours(&self) -> Decimal {
        let millis = (self.end_time - self.start_time).num_milliseconds();
        Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
    }

    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }

    pub fn operational_cost(&self) -> Decimal {
        crate::pricing::operational_cost(&self.staff)
    }
}
