//! Pure UI helpers extracted from components for non-wasm testing.

use chrono::{DateTime, Duration, Utc};

/// Entry of a windowed page selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageToken {
    /// Clickable page number.
    Page(u32),
    /// Gap marker.
    Ellipsis,
}

/// Pages shown without windowing.
const FULL_PAGE_LIMIT: u32 = 7;

/// Windowed page selector entries.
///
/// Up to seven pages are listed in full. Beyond that the first and last page
/// are always present, a three-page window follows the current page (clamped
/// to the edges) and gaps are marked with [`PageToken::Ellipsis`].
#[must_use]
pub fn page_window(current: u32, total: u32) -> Vec<PageToken> {
    if total <= FULL_PAGE_LIMIT {
        return (1..=total).map(PageToken::Page).collect();
    }
    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(1).max(2);
    let mut end = (current + 1).min(total - 1);
    if current <= 3 {
        end = 4;
    }
    if current >= total - 2 {
        start = total - 3;
    }

    let mut tokens = vec![PageToken::Page(1)];
    if start > 2 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.extend((start..=end).map(PageToken::Page));
    if end < total - 1 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total));
    tokens
}

/// Number of local pages for `len` items.
#[must_use]
pub const fn local_page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Items of the 1-based local `page`.
#[must_use]
pub fn local_page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Strip markup from rich text.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// Plain-text card preview of rich text.
#[must_use]
pub fn plain_text_preview(html: &str, max_chars: usize) -> String {
    truncate_text(strip_html(html).trim(), max_chars)
}

/// Whether a posting created at `created_at` still counts as new.
#[must_use]
pub fn is_new_posting(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(created_at) < Duration::days(7)
}

/// "1 application" / "N applications".
#[must_use]
pub fn application_count_label(count: u32) -> String {
    if count == 1 {
        "1 application".to_string()
    } else {
        format!("{count} applications")
    }
}

/// Salary shown on cards, e.g. `$85,000`.
#[must_use]
pub fn format_salary(salary: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = salary.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageToken::{Ellipsis, Page};

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(page_window(3, 7), (1..=7).map(Page).collect::<Vec<_>>());
        assert_eq!(page_window(1, 1), vec![Page(1)]);
    }

    #[test]
    fn window_clamps_at_the_start() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_clamps_at_the_end() {
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_centres_on_current_page() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn local_pages_slice_in_order() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(local_page_count(items.len(), 5), 3);
        assert_eq!(local_page_slice(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(local_page_slice(&items, 3, 5), &[11, 12]);
        assert!(local_page_slice(&items, 4, 5).is_empty());
        assert_eq!(local_page_count(0, 5), 0);
    }

    #[test]
    fn preview_strips_markup_and_truncates() {
        let html = "<p>Build <strong>fast</strong> services &amp; tools</p>";
        assert_eq!(plain_text_preview(html, 120), "Build fast services & tools");
        assert_eq!(plain_text_preview(html, 5), "Build...");
    }

    #[test]
    fn postings_are_new_for_seven_days() {
        let now = Utc::now();
        assert!(is_new_posting(now - Duration::days(6), now));
        assert!(!is_new_posting(now - Duration::days(7), now));
    }

    #[test]
    fn counts_and_salaries_render() {
        assert_eq!(application_count_label(1), "1 application");
        assert_eq!(application_count_label(0), "0 applications");
        assert_eq!(format_salary(85_000.0), "$85,000");
        assert_eq!(format_salary(1_250_000.4), "$1,250,000");
        assert_eq!(format_salary(950.0), "$950");
    }
}
