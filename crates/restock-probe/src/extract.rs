// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing-page extraction.
//!
//! Deliberately naive string scanning tailored to the retailer's listing
//! markup: product cards carry an `item-container` class, titles an
//! `item-title` class, and the purchase action block an `item-operate`
//! class. Parsing rules are a fixed, replaceable predicate; nothing else in
//! the workspace knows about markup.

use tracing::debug;

/// Text on the action block that indicates a purchase is offered.
const PURCHASE_CUE: &str = "add to cart";

/// Text on the action block that indicates an explicit out-of-stock state.
const OUT_OF_STOCK_CUE: &str = "out of stock";

/// Scans the listing HTML for the target product and classifies availability.
///
/// Cards without a parsable title are skipped, not treated as errors. The
/// title match is a case-sensitive substring match against the verbatim
/// marketing name. A matching card is purchasable when its action text
/// contains a purchase cue and no out-of-stock cue; a matching card with no
/// action block at all is not available. Returns `true` as soon as one
/// matching, available card is found.
pub fn listing_availability(html: &str, target: &str) -> bool {
    let mut cards = 0usize;
    for card in html.split("item-container").skip(1) {
        cards += 1;
        let Some(title) = element_text(card, "item-title") else {
            continue;
        };
        if !title.contains(target) {
            continue;
        }

        let purchasable = match element_text(card, "item-operate") {
            Some(status) => {
                let status = status.to_ascii_lowercase();
                status.contains(PURCHASE_CUE) && !status.contains(OUT_OF_STOCK_CUE)
            }
            None => false,
        };
        debug!(title, purchasable, "matched listing card");
        if purchasable {
            return true;
        }
    }
    debug!(cards, target, "no available card matched");
    false
}

/// Extracts the visible text of the first element in `fragment` whose
/// opening tag carries `class_marker`, or `None` if there is no such element
/// or it has no text.
fn element_text(fragment: &str, class_marker: &str) -> Option<String> {
    let marker = fragment.find(class_marker)?;
    // Walk back to the opening `<` to learn the tag name, then forward past
    // the end of the opening tag.
    let tag_start = fragment[..marker].rfind('<')?;
    let tag_name: String = fragment[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag_name.is_empty() {
        return None;
    }
    let open_end = marker + fragment[marker..].find('>')? + 1;
    let close = format!("</{tag_name}");
    let close_rel = fragment[open_end..].find(&close)?;

    let text = strip_tags(&fragment[open_end..open_end + close_rel]);
    if text.is_empty() { None } else { Some(text) }
}

/// Removes all `<...>` tags, decodes the common entities, and collapses
/// whitespace.
fn strip_tags(s: &str) -> String {
    let mut flat = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => flat.push(ch),
            _ => {}
        }
    }
    let flat = flat.replace("&nbsp;", " ").replace("&amp;", "&");

    let mut out = String::with_capacity(flat.len());
    let mut prev_space = true;
    for ch in flat.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim_end().to_string()
}
