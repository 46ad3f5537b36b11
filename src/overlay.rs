// Loading overlay hand-off: shown while the title runs, faded out once it
// completes, then taken out of the layout.

use crate::constants::{HIDDEN_CLASS, LOADED_CLASS, LOADING_SCREEN_ID, OVERLAY_FADE_MS};
use web_sys as web;

fn overlay(document: &web::Document) -> Option<web::Element> {
    document.get_element_by_id(LOADING_SCREEN_ID)
}

/// Put the overlay back in its initial visible state for a fresh intro.
pub fn reveal(document: &web::Document) {
    if let Some(el) = overlay(document) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        _ = el.remove_attribute("style");
    }
}

/// Start the opacity transition and mark the page loaded.
///
/// Returns `false` without touching anything if the overlay was already
/// dismissed. [`dismiss`] should follow after [`OVERLAY_FADE_MS`].
pub fn begin_fade(document: &web::Document) -> bool {
    let el = overlay(document);
    if el
        .as_ref()
        .is_some_and(|el| el.class_list().contains(HIDDEN_CLASS))
    {
        return false;
    }
    if let Some(el) = el {
        _ = el.set_attribute(
            "style",
            &format!(
                "opacity:0;transition:opacity {}ms cubic-bezier(0.4,0,0.2,1)",
                OVERLAY_FADE_MS
            ),
        );
    }
    mark_loaded(document);
    true
}

/// Take the overlay out of the layout for good.
pub fn dismiss(document: &web::Document) {
    if let Some(el) = overlay(document) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
    mark_loaded(document);
}

/// Let the page know the intro is over so content can animate in.
fn mark_loaded(document: &web::Document) {
    if let Some(body) = document.body() {
        _ = body.class_list().add_1(LOADED_CLASS);
    }
}
