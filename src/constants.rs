/// Page wiring and transition timing constants.
///
/// Element ids and attribute names the page markup must provide, plus the
/// timing of the loading overlay hand-off once the intro finishes.

// Loading screen overlay and the canvas the title forms on
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_CANVAS_ID: &str = "loading-canvas";

// Optional full-page canvas for the ambient starfield
pub const BACKGROUND_CANVAS_ID: &str = "background-canvas";

// Class toggled on <body> once the intro is gone
pub const LOADED_CLASS: &str = "loaded";
pub const HIDDEN_CLASS: &str = "hidden";

// Completion hand-off (milliseconds)
pub const COMPLETE_DELAY_MS: i32 = 100; // overlap with the content fade-in
pub const OVERLAY_FADE_MS: i32 = 600;

// Upper bound on the device pixel ratio used for canvas backing stores
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
