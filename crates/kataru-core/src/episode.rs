//! Episode listing pagination and thread-reference extraction.
//!
//! The episode listing is a paginated HTML table, 100 rows per page. An
//! episode number maps to a page offset and a row index within that page;
//! the row's last cell links to the episode's discussion thread.

use scraper::{Html, Selector};

/// Rows per listing page.
pub const ROWS_PER_PAGE: u32 = 100;

/// Where an episode's row lives in the paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeLocation {
    /// Offset query parameter for the page containing the episode.
    pub page_offset: u32,
    /// 1-based row index within the page's table body.
    pub row_index: usize,
}

/// Map an episode number to its listing page and row.
///
/// Returns `None` for episode 0, which no listing contains. Episodes at exact
/// multiples of 100 are the last row of their page, not the first row of the
/// next one.
pub fn locate_episode(episode: u32) -> Option<EpisodeLocation> {
    if episode == 0 {
        return None;
    }
    Some(EpisodeLocation {
        page_offset: page_offset(episode),
        row_index: row_index(episode),
    })
}

fn page_offset(episode: u32) -> u32 {
    if episode > ROWS_PER_PAGE {
        ((episode - 1) / ROWS_PER_PAGE) * ROWS_PER_PAGE
    } else {
        0
    }
}

fn row_index(episode: u32) -> usize {
    let rem = episode % ROWS_PER_PAGE;
    if rem == 0 {
        ROWS_PER_PAGE as usize
    } else {
        rem as usize
    }
}

/// Pull the discussion thread reference out of a listing page.
///
/// Finds the first `table.episode_list`, takes the row at `row_index`
/// (the header row sits at index 0), follows the link in the row's last
/// cell, and returns the trailing id of its href. Any missing piece
/// yields `None`.
pub fn parse_thread_ref(html: &str, row_index: usize) -> Option<String> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table.episode_list").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td, th").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let table = document.select(&table_sel).next()?;
    let row = table.select(&row_sel).nth(row_index)?;
    let cell = row.select(&cell_sel).last()?;
    let link = cell.select(&link_sel).next()?;
    let href = link.value().attr("href")?;
    thread_ref_from_href(href)
}

/// The thread id is whatever follows the final `=` in the href.
fn thread_ref_from_href(href: &str) -> Option<String> {
    let (_, id) = href.rsplit_once('=')?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(locate_episode(1).unwrap().page_offset, 0);
        assert_eq!(locate_episode(100).unwrap().page_offset, 0);
    }

    #[test]
    fn offset_steps_at_page_boundaries() {
        assert_eq!(locate_episode(101).unwrap().page_offset, 100);
        assert_eq!(locate_episode(150).unwrap().page_offset, 100);
        assert_eq!(locate_episode(200).unwrap().page_offset, 100);
        assert_eq!(locate_episode(201).unwrap().page_offset, 200);
    }

    #[test]
    fn row_index_wraps_within_the_page() {
        assert_eq!(locate_episode(1).unwrap().row_index, 1);
        assert_eq!(locate_episode(100).unwrap().row_index, 100);
        assert_eq!(locate_episode(101).unwrap().row_index, 1);
        assert_eq!(locate_episode(200).unwrap().row_index, 100);
    }

    #[test]
    fn episode_zero_has_no_location() {
        assert!(locate_episode(0).is_none());
    }

    fn listing_with_rows(rows: &[(u32, &str)]) -> String {
        let mut body = String::from(
            "<html><body><table class=\"episode_list\">\
             <tr><th>#</th><th>Title</th><th>Forum</th></tr>",
        );
        for (ep, href) in rows {
            body.push_str(&format!(
                "<tr><td>{ep}</td><td>Episode {ep}</td>\
                 <td><a href=\"{href}\">Discussion</a></td></tr>"
            ));
        }
        body.push_str("</table></body></html>");
        body
    }

    #[test]
    fn extracts_thread_ref_from_the_right_row() {
        let html = listing_with_rows(&[
            (1, "/forum/?topicid=111"),
            (2, "/forum/?topicid=222"),
            (3, "/forum/?topicid=333"),
        ]);
        assert_eq!(parse_thread_ref(&html, 2), Some("222".to_string()));
    }

    #[test]
    fn missing_table_yields_none() {
        assert!(parse_thread_ref("<html><body><p>nope</p></body></html>", 1).is_none());
    }

    #[test]
    fn row_out_of_range_yields_none() {
        let html = listing_with_rows(&[(1, "/forum/?topicid=111")]);
        assert!(parse_thread_ref(&html, 5).is_none());
    }

    #[test]
    fn row_without_link_yields_none() {
        let html = "<table class=\"episode_list\">\
                    <tr><th>#</th></tr>\
                    <tr><td>1</td><td>no link here</td></tr>\
                    </table>";
        assert!(parse_thread_ref(html, 1).is_none());
    }

    #[test]
    fn href_without_id_yields_none() {
        let html = listing_with_rows(&[(1, "/forum/?topicid=")]);
        assert!(parse_thread_ref(&html, 1).is_none());
    }
}
