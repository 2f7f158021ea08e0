use super::*;

#[test]
fn stylesheet_covers_shell_and_chrome_classes() {
    for class in [
        ".shell__spinner",
        ".shell__message",
        ".shell__content",
        ".sidebar__link--active",
        ".header__logout",
        ".login-card",
        ".dashboard__greeting",
    ] {
        assert!(STYLESHEET.contains(class), "missing {class}");
    }
}
