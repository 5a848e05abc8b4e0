//! HTML-to-entry extraction for diary listing pages.
//!
//! Two strategies, tried in order: the primary one walks diary rows, the
//! fallback scans the whole document for film links. The fallback only runs
//! when the primary strategy produced nothing at all; running it on top of
//! a partial primary result would pick up duplicate and non-diary links.

use film_diary_models::RawEntry;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Path segment present in every film link on the site.
pub const FILM_PATH_SEGMENT: &str = "/film/";

/// Extract raw entries from one diary page.
///
/// Never fails: malformed or missing fields surface as `None` and are
/// filtered by the paginator.
pub fn parse_diary_page(html: &str, base_url: &str) -> Vec<RawEntry> {
    let document = Html::parse_document(html);

    let entries = extract_diary_rows(&document, base_url);
    if !entries.is_empty() {
        return entries;
    }
    extract_film_links(&document, base_url)
}

/// Primary strategy: one entry per diary row.
fn extract_diary_rows(document: &Html, base_url: &str) -> Vec<RawEntry> {
    let diary_row = Selector::parse("tr.diary-entry-row").unwrap();
    let any_row = Selector::parse("tr").unwrap();
    let heading_link = Selector::parse("h2 a, h3 a").unwrap();

    let mut rows: Vec<ElementRef> = document.select(&diary_row).collect();
    if rows.is_empty() {
        // Some page contexts drop the row class; treat every row as a candidate.
        rows = document.select(&any_row).collect();
    }

    let mut entries = Vec::new();
    for row in rows {
        let link = match row.select(&heading_link).next() {
            Some(link) => link,
            None => continue,
        };
        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        entries.push(RawEntry {
            date: row_date(&row).map(|d| truncate_date(&d)),
            title: element_text(&link),
            film_url: Some(absolutize(href, base_url)),
        });
    }
    entries
}

/// Date of a diary row, by preference: explicit row attribute, nested
/// `<time>` element, then the day-link URL.
fn row_date(row: &ElementRef) -> Option<String> {
    if let Some(date) = row.value().attr("data-viewing-date") {
        return Some(date.to_string());
    }

    let time_el = Selector::parse("time[datetime]").unwrap();
    if let Some(time) = row.select(&time_el).next() {
        if let Some(date) = time.value().attr("datetime") {
            return Some(date.to_string());
        }
    }

    let day_link = Selector::parse(r#"a[href*="/diary/films/for/"]"#).unwrap();
    let day_pattern = Regex::new(r"/diary/films/for/(\d{4})/(\d{2})/(\d{2})/").unwrap();
    for link in row.select(&day_link) {
        if let Some(href) = link.value().attr("href") {
            if let Some(caps) = day_pattern.captures(href) {
                return Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
            }
        }
    }

    None
}

/// Fallback strategy: any film link anywhere on the page, dated from its
/// nearest enclosing container.
fn extract_film_links(document: &Html, base_url: &str) -> Vec<RawEntry> {
    let anchor = Selector::parse("a[href]").unwrap();

    let mut entries = Vec::new();
    for link in document.select(&anchor) {
        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if !href.contains(FILM_PATH_SEGMENT) {
            continue;
        }

        entries.push(RawEntry {
            date: enclosing_date(&link).map(|d| truncate_date(&d)),
            title: element_text(&link),
            film_url: Some(absolutize(href, base_url)),
        });
    }
    entries
}

/// Walk up from a link looking for a container that carries a date, either
/// as an attribute or as a `<time>` element somewhere below it.
fn enclosing_date(link: &ElementRef) -> Option<String> {
    let time_el = Selector::parse("time[datetime]").unwrap();

    let mut current = link.parent();
    while let Some(node) = current {
        if let Some(container) = ElementRef::wrap(node) {
            for attr in ["data-viewing-date", "data-date"] {
                if let Some(date) = container.value().attr(attr) {
                    return Some(date.to_string());
                }
            }
            if let Some(time) = container.select(&time_el).next() {
                if let Some(date) = time.value().attr("datetime") {
                    return Some(date.to_string());
                }
            }
        }
        current = node.parent();
    }
    None
}

fn element_text(el: &ElementRef) -> Option<String> {
    let text = el.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Resolve a possibly-relative href against the site origin.
fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Datetime attributes sometimes carry a time component; keep the date part.
fn truncate_date(date: &str) -> String {
    date.chars().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://letterboxd.com";

    fn diary_row(date_attr: &str, href: &str, title: &str) -> String {
        format!(
            r#"<tr class="diary-entry-row" data-viewing-date="{date_attr}">
                 <td><h3><a href="{href}">{title}</a></h3></td>
               </tr>"#
        )
    }

    fn page(rows: &str) -> String {
        format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
    }

    #[test]
    fn parses_rows_with_date_attribute() {
        let html = page(&format!(
            "{}{}",
            diary_row("2025-03-01", "/film/the-substance/", "The Substance"),
            diary_row("2025-03-02", "/film/anora/", "Anora"),
        ));

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date.as_deref(), Some("2025-03-01"));
        assert_eq!(entries[0].title.as_deref(), Some("The Substance"));
        assert_eq!(
            entries[0].film_url.as_deref(),
            Some("https://letterboxd.com/film/the-substance/")
        );
        assert_eq!(entries[1].date.as_deref(), Some("2025-03-02"));
    }

    #[test]
    fn absolute_hrefs_are_left_alone() {
        let html = page(&diary_row(
            "2025-01-05",
            "https://letterboxd.com/film/heat/",
            "Heat",
        ));

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(
            entries[0].film_url.as_deref(),
            Some("https://letterboxd.com/film/heat/")
        );
    }

    #[test]
    fn falls_back_to_time_element_for_date() {
        let html = page(
            r#"<tr class="diary-entry-row">
                 <td><time datetime="2025-04-09T00:00:00Z"></time></td>
                 <td><h3><a href="/film/conclave/">Conclave</a></h3></td>
               </tr>"#,
        );

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        // Truncated to the date part.
        assert_eq!(entries[0].date.as_deref(), Some("2025-04-09"));
    }

    #[test]
    fn falls_back_to_day_link_for_date() {
        let html = page(
            r#"<tr class="diary-entry-row">
                 <td><a href="/someone/films/diary/for/2025/07/19/">19</a></td>
                 <td><h2><a href="/film/tenet/">Tenet</a></h2></td>
               </tr>"#,
        );

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.as_deref(), Some("2025-07-19"));
    }

    #[test]
    fn row_without_heading_link_is_skipped() {
        let html = page(&format!(
            r#"<tr class="diary-entry-row" data-viewing-date="2025-02-01">
                 <td>no link here</td>
               </tr>
               {}"#,
            diary_row("2025-02-02", "/film/nosferatu/", "Nosferatu"),
        ));

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Nosferatu"));
    }

    #[test]
    fn row_with_missing_date_still_yields_entry() {
        let html = page(r#"<tr class="diary-entry-row"><td><h3><a href="/film/dune/">Dune</a></h3></td></tr>"#);

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, None);
        assert_eq!(entries[0].film_url.as_deref(), Some("https://letterboxd.com/film/dune/"));
    }

    #[test]
    fn unclassed_rows_are_candidates_when_no_diary_rows_exist() {
        let html = page(
            r#"<tr data-viewing-date="2025-06-30">
                 <td><h3><a href="/film/oppenheimer/">Oppenheimer</a></h3></td>
               </tr>"#,
        );

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.as_deref(), Some("2025-06-30"));
    }

    #[test]
    fn fallback_scans_whole_document_for_film_links() {
        // No rows at all: the primary strategy yields nothing.
        let html = r#"<html><body>
            <div data-viewing-date="2025-08-14">
              <a href="/film/past-lives/">Past Lives</a>
            </div>
            <a href="/about/">About</a>
        </body></html>"#;

        let entries = parse_diary_page(html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Past Lives"));
        assert_eq!(entries[0].date.as_deref(), Some("2025-08-14"));
        assert_eq!(
            entries[0].film_url.as_deref(),
            Some("https://letterboxd.com/film/past-lives/")
        );
    }

    #[test]
    fn fallback_takes_date_from_enclosing_time_element() {
        let html = r#"<html><body>
            <section>
              <time datetime="2025-09-01"></time>
              <p><a href="/film/la-chimera/">La Chimera</a></p>
            </section>
        </body></html>"#;

        let entries = parse_diary_page(html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.as_deref(), Some("2025-09-01"));
    }

    #[test]
    fn fallback_does_not_fire_when_primary_matched() {
        // One proper diary row plus a stray film link outside any row: the
        // stray link must not show up.
        let html = format!(
            r#"<html><body>
              <table><tbody>{}</tbody></table>
              <div><a href="/film/some-promo/">Promo</a></div>
            </body></html>"#,
            diary_row("2025-05-05", "/film/perfect-days/", "Perfect Days"),
        );

        let entries = parse_diary_page(&html, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Perfect Days"));
    }

    #[test]
    fn empty_page_yields_no_entries() {
        assert!(parse_diary_page("<html><body></body></html>", BASE).is_empty());
        assert!(parse_diary_page("", BASE).is_empty());
    }
}
