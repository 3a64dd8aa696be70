//! Utility functions

/// Masks a login identifier for log output, keeping at most two leading characters.
pub fn mask_login(login: &str) -> String {
    let visible: String = login.chars().take(2).collect();
    if login.chars().count() <= 2 {
        format!("{}***", visible.chars().next().map(String::from).unwrap_or_default())
    } else {
        format!("{}***", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_login() {
        assert_eq!(mask_login("neo_anderson"), "ne***");
        assert_eq!(mask_login("ab"), "a***");
        assert_eq!(mask_login(""), "***");
    }

    #[test]
    fn test_mask_login_multibyte() {
        assert_eq!(mask_login("ñandú"), "ña***");
    }
}
