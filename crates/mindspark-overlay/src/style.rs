//! Overlay styling.
//!
//! Every rule is scoped under the isolated root, so nothing leaks into the
//! host page and host rules do not reach in.

/// Id of the single container element injected into the page.
pub const CONTAINER_ID: &str = "mindspark-host";

/// Inline style of the container itself. It covers nothing and takes no
/// pointer events; children opt back in.
pub const CONTAINER_STYLE: &str =
    "position: absolute; top: 0; left: 0; width: 0; height: 0; z-index: 2147483647; pointer-events: none;";

pub const PRIMARY: &str = "#5048e5";
pub const MENU_BG: &str = "#1a192e";
pub const PANEL_BG: &str = "#232238";
pub const TEXT_MAIN: &str = "#e2e8f0";
pub const TEXT_SUB: &str = "#94a3b8";
pub const BORDER: &str = "rgba(255, 255, 255, 0.08)";
pub const ERROR: &str = "#f87171";

/// Stylesheet attached inside the isolated root.
pub fn stylesheet() -> String {
    format!(
        r#":host {{ all: initial; }}
* {{ box-sizing: border-box; }}
.ms-container {{ position: absolute; pointer-events: auto; z-index: 2147483647; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; font-size: 14px; line-height: 1.5; color: {text}; }}
.ms-float-btn {{ position: absolute; width: 38px; height: 38px; border-radius: 50%; background: {primary}; color: white; display: flex; align-items: center; justify-content: center; cursor: pointer; user-select: none; border: 2px solid rgba(255,255,255,0.2); transform: translate(-50%, 0); }}
.ms-menu {{ position: absolute; width: 340px; padding: 8px; gap: 6px; flex-direction: column; background: {menu}; border: 1px solid {border}; border-radius: 12px; transform: translate(-50%, 0); box-shadow: 0 20px 50px -10px rgba(0,0,0,0.6); }}
.ms-header {{ display: flex; justify-content: space-between; align-items: center; padding: 4px 8px 8px; border-bottom: 1px solid {border}; }}
.ms-logo {{ font-size: 12px; font-weight: 600; text-transform: uppercase; color: {sub}; }}
.ms-icon-settings {{ background: none; border: none; cursor: pointer; color: {sub}; }}
.ms-card {{ background: {panel}; border: 1px solid {border}; border-radius: 8px; overflow: hidden; }}
.ms-card.ms-active {{ border-color: {primary}; }}
.ms-card-header {{ width: 100%; display: flex; gap: 10px; padding: 10px 12px; background: transparent; border: none; color: {text}; text-align: left; cursor: pointer; }}
.ms-card-title {{ flex: 1; font-weight: 500; }}
.ms-shortcut {{ font-size: 11px; font-family: monospace; opacity: 0.5; color: {sub}; }}
.ms-card-body {{ overflow: hidden; background: rgba(0,0,0,0.2); transition: height 0.3s ease; }}
.ms-content {{ position: relative; padding: 0 12px 12px; font-size: 13px; line-height: 1.6; color: {sub}; }}
.ms-text-block {{ white-space: pre-wrap; }}
.ms-truncated .ms-text-block {{ mask-image: linear-gradient(to bottom, black 60%, transparent 100%); -webkit-mask-image: linear-gradient(to bottom, black 60%, transparent 100%); }}
.ms-processing {{ display: flex; align-items: center; gap: 8px; padding: 12px; }}
.ms-dot {{ width: 8px; height: 8px; border-radius: 50%; background: {primary}; opacity: 0.8; }}
.ms-status-text {{ font-size: 11px; font-weight: 600; text-transform: uppercase; color: {primary}; }}
.ms-error {{ padding: 12px; color: {error}; white-space: pre-wrap; }}
.ms-link {{ background: none; border: none; padding: 0 12px 12px; color: {primary}; cursor: pointer; text-decoration: underline; }}
.ms-actions-bar {{ display: flex; justify-content: space-between; align-items: center; margin-top: 8px; padding-top: 8px; border-top: 1px solid {border}; }}
.ms-icon-btn {{ width: 24px; height: 24px; border: none; border-radius: 4px; background: rgba(255,255,255,0.05); color: {sub}; cursor: pointer; }}
.ms-icon-btn.ms-confirmed {{ color: #10b981; }}
.ms-expand-btn {{ flex: 1; height: 20px; background: transparent; border: none; color: {sub}; cursor: pointer; }}
.ms-float-btn:hover {{ filter: brightness(1.15); }}
"#,
        text = TEXT_MAIN,
        sub = TEXT_SUB,
        primary = PRIMARY,
        menu = MENU_BG,
        panel = PANEL_BG,
        border = BORDER,
        error = ERROR,
    )
}
