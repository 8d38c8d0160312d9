//! Ticket transaction view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketCreate {
    #[serde(rename = "TicketCount")]
    pub ticket_count: Option<u32>,
}
