//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_lead--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable: copy the id from the
//! DOM inspector, paste it into the IDE and you land in `domain/a001_lead/`.

/// Table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// System administration page (users, departments).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Free-form page outside the shell (login).
pub const PAGE_CAT_CUSTOM: &str = "custom";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_lead--list"));
        assert!(is_valid_page_id("users--system"));
        assert!(!is_valid_page_id("a001_lead"));
        assert!(!is_valid_page_id("--list"));
    }
}
