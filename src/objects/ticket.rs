//! Ticket ledger-object view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "TicketSequence")]
    pub ticket_sequence: Option<u32>,
}
