//! Append-only log of emitted exchange events.

use chrono::Utc;
use tokenswap_types::{EventRecord, ExchangeEvent};

/// Buffered events awaiting an off-core consumer.
///
/// Sequence numbers keep increasing across [`EventLog::drain`] calls, so a
/// consumer can detect gaps.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_sequence: u64,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Append an event and return its record.
    pub fn emit(&mut self, event: ExchangeEvent) -> &EventRecord {
        let record = EventRecord {
            sequence: self.next_sequence,
            event,
            emitted_at: Utc::now(),
        };
        self.next_sequence += 1;
        tracing::debug!(seq = record.sequence, %event, "Event emitted");
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Records not yet drained, oldest first.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Hand all pending records to the caller.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }
}

#[cfg(test)]
mod tests {
    use tokenswap_types::OfferId;

    use super::*;

    #[test]
    fn emit_assigns_increasing_sequence() {
        let mut log = EventLog::new();
        log.emit(ExchangeEvent::OfferCreated(OfferId(1)));
        log.emit(ExchangeEvent::OfferRemoved(OfferId(1)));
        let seqs: Vec<u64> = log.records().iter().map(|r| r.sequence).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn drain_empties_but_keeps_counter() {
        let mut log = EventLog::new();
        log.emit(ExchangeEvent::OfferCreated(OfferId(1)));
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.records().is_empty());

        let next = log.emit(ExchangeEvent::OfferCreated(OfferId(2)));
        assert_eq!(next.sequence, 1);
    }
}
