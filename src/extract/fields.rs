//! Per-field readers.
//!
//! Each reader returns an optional value: a field that is absent, blank, or
//! could not be read because the session failed for this one query is `None`.
//! The block-level step decides whether `None` means fallback or skip.

use log::debug;

use crate::session::{BlockHandle, RenderingSession};

pub(super) async fn read_departure_time<S: RenderingSession>(
    session: &mut S,
    block: &BlockHandle,
    selector: &str,
) -> Option<String> {
    read_text_field(session, block, selector, "departure time").await
}

pub(super) async fn read_price_text<S: RenderingSession>(
    session: &mut S,
    block: &BlockHandle,
    selector: &str,
) -> Option<String> {
    read_text_field(session, block, selector, "price").await
}

/// Inline booking action of the select button.
pub(super) async fn read_booking_action<S: RenderingSession>(
    session: &mut S,
    block: &BlockHandle,
    selector: &str,
    attribute: &str,
) -> Option<String> {
    match session.read_attribute(block, selector, attribute).await {
        Ok(value) => value,
        Err(e) => {
            debug!(
                "Block #{}: could not read booking action: {}",
                block.position(),
                e
            );
            None
        }
    }
}

async fn read_text_field<S: RenderingSession>(
    session: &mut S,
    block: &BlockHandle,
    selector: &str,
    field: &str,
) -> Option<String> {
    match session.read_text(block, selector).await {
        Ok(value) => value,
        Err(e) => {
            debug!("Block #{}: could not read {}: {}", block.position(), field, e);
            None
        }
    }
}
