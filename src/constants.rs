/// Browser-side constants for mounting and compositing.
// Theme flag lives on <html data-theme="dark|light">
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const DARK_THEME: &str = "dark";

// Bloom approximation: one blurred blit under one crisp blit
pub const BLOOM_FILTER: &str = "blur(1px)";
pub const NO_FILTER: &str = "none";

// Composite operations used by `Blend`
pub const COMPOSITE_NORMAL: &str = "source-over";
pub const COMPOSITE_SCREEN: &str = "screen";

// Events wired on mount and removed on unmount
pub const EV_MOUSE_MOVE: &str = "mousemove";
pub const EV_MOUSE_ENTER: &str = "mouseenter";
pub const EV_MOUSE_LEAVE: &str = "mouseleave";
pub const EV_CLICK: &str = "click";
pub const EV_TOUCH_START: &str = "touchstart";
pub const EV_TOUCH_MOVE: &str = "touchmove";
pub const EV_TOUCH_END: &str = "touchend";
pub const EV_RESIZE: &str = "resize";
