//! Offer extraction.
//!
//! Walks the offer blocks of a ready result page in document order and turns
//! each one into a [`RawOffer`]. Field failures never abort the walk:
//!
//! - no departure time: the block is dropped
//! - no usable booking action: the search URL is used as the link
//! - no price: the offer is kept and later normalized as sold out
//!
//! Blocks are read one at a time with a pause in between.

mod fields;
mod link;

use std::time::Duration;

use log::{debug, warn};
use url::Url;

use crate::config::PageLayout;
use crate::error_handling::{ExtractionStats, InfoType, SessionError, WarningType};
use crate::models::RawOffer;
use crate::session::{BlockHandle, RenderingSession};

use link::resolve_booking_link;

/// Everything the extractor needs besides the session.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Selectors for offer blocks and their fields
    pub layout: &'a PageLayout,
    /// Base for relative booking paths
    pub base_url: &'a Url,
    /// Fallback booking link
    pub search_url: &'a str,
    /// Pause between consecutive blocks
    pub pacing: Duration,
    /// Receives field-level warnings and block counts
    pub stats: &'a ExtractionStats,
}

/// Result of walking the offer blocks of one page.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    /// One entry per block that had a departure time, in page order
    pub offers: Vec<RawOffer>,
    /// Number of blocks enumerated on the page
    pub blocks_found: usize,
}

impl ExtractionOutcome {
    /// Blocks that produced no offer.
    pub fn blocks_dropped(&self) -> usize {
        self.blocks_found.saturating_sub(self.offers.len())
    }
}

/// Extracts the raw offers of the current page.
///
/// # Errors
///
/// Only a failure to enumerate the blocks is an error; per-field failures are
/// recovered and counted in `ctx.stats`.
pub async fn extract_offers<S: RenderingSession>(
    session: &mut S,
    ctx: &ExtractionContext<'_>,
) -> Result<ExtractionOutcome, SessionError> {
    let blocks = session.find_blocks(&ctx.layout.offer_block).await?;
    ctx.stats.add_info(InfoType::BlocksFound, blocks.len());
    debug!("Found {} offer block(s)", blocks.len());

    let mut offers = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 && !ctx.pacing.is_zero() {
            tokio::time::sleep(ctx.pacing).await;
        }
        if let Some(offer) = extract_block(session, block, ctx).await {
            offers.push(offer);
        }
    }

    Ok(ExtractionOutcome {
        blocks_found: blocks.len(),
        offers,
    })
}

/// Reads one offer block; `None` when the block has no departure time.
pub async fn extract_block<S: RenderingSession>(
    session: &mut S,
    block: &BlockHandle,
    ctx: &ExtractionContext<'_>,
) -> Option<RawOffer> {
    let layout = ctx.layout;

    let Some(departure_time) =
        fields::read_departure_time(session, block, &layout.departure_time).await
    else {
        warn!(
            "Skipping offer block #{}: no departure time",
            block.position()
        );
        ctx.stats.increment_warning(WarningType::MissingDepartureTime);
        return None;
    };

    let action = fields::read_booking_action(
        session,
        block,
        &layout.select_button,
        &layout.booking_attribute,
    )
    .await;
    let outcome = resolve_booking_link(action.as_deref(), ctx.base_url);
    if let Some(warning) = outcome.warning() {
        debug!(
            "Block #{}: {}; linking to the search page",
            block.position(),
            warning.as_str()
        );
        ctx.stats.increment_warning(warning);
    }
    let booking_link = outcome.into_link(ctx.search_url);

    let price_text = fields::read_price_text(session, block, &layout.price).await;
    if price_text.is_none() {
        debug!("Block #{}: no price, treating as sold out", block.position());
        ctx.stats.increment_warning(WarningType::MissingPrice);
    }

    Some(RawOffer {
        departure_time,
        price_text,
        booking_link,
    })
}
