//! Slide image extraction from presentation HTML
//!
//! Slides are `<img>` elements carrying the `slide_image` class. Each one
//! exposes its source in one or more resolution attributes; the best one is
//! picked from the first slide and used for the whole deck.

use crate::error::{Error, Result};
use crate::types::SlideImageRef;
use scraper::{Html, Selector};
use url::Url;

/// CSS selector matching slide images
pub const SLIDE_SELECTOR: &str = "img.slide_image";

/// Resolution attributes in order of preference
pub const RESOLUTION_PREFERENCE: [&str; 2] = ["data-full", "data-normal"];

/// Extract the ordered slide image list from a page
///
/// Relative image URLs are resolved against `page_url`.
///
/// # Errors
///
/// Returns [`Error::NoSlidesFound`] when the page has no slide images, when the
/// first slide has none of the [`RESOLUTION_PREFERENCE`] attributes, or when a
/// later slide lacks the attribute chosen from the first one.
///
/// # Examples
///
/// ```
/// use slidegrab::extractor::extract_slides;
///
/// let html = r#"<img class="slide_image" data-full="/s/1.jpg">
///               <img class="slide_image" data-full="/s/2.jpg">"#;
/// let slides = extract_slides(html, "http://site/a/deck").unwrap();
/// assert_eq!(slides.len(), 2);
/// assert_eq!(slides[1].remote_url, "http://site/s/2.jpg");
/// ```
pub fn extract_slides(html: &str, page_url: &str) -> Result<Vec<SlideImageRef>> {
    let no_slides = |reason: String| Error::NoSlidesFound {
        url: page_url.to_string(),
        reason,
    };

    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);
    let selector = Selector::parse(SLIDE_SELECTOR)
        .map_err(|e| no_slides(format!("invalid slide selector: {e}")))?;

    let images: Vec<_> = document.select(&selector).collect();
    let first = images
        .first()
        .ok_or_else(|| no_slides("page has no slide images".to_string()))?;

    let attribute = choose_resolution(first).ok_or_else(|| {
        no_slides(format!(
            "first slide has none of {}",
            RESOLUTION_PREFERENCE.join(", ")
        ))
    })?;

    let mut slides = Vec::with_capacity(images.len());
    for (position, image) in images.iter().enumerate() {
        let index = u32::try_from(position + 1)
            .map_err(|_| no_slides("too many slides".to_string()))?;

        let raw = image
            .value()
            .attr(attribute)
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .ok_or_else(|| no_slides(format!("slide {index} has no {attribute} attribute")))?;

        let remote_url = resolve_image_url(base.as_ref(), raw)
            .ok_or_else(|| no_slides(format!("slide {index} has invalid URL '{raw}'")))?;

        slides.push(SlideImageRef { index, remote_url });
    }

    tracing::debug!(
        url = %page_url,
        count = slides.len(),
        attribute,
        "extracted slide images"
    );

    Ok(slides)
}

/// Pick the preferred resolution attribute present on `image`
pub fn choose_resolution(image: &scraper::ElementRef<'_>) -> Option<&'static str> {
    RESOLUTION_PREFERENCE
        .into_iter()
        .find(|attr| image.value().attr(attr).is_some())
}

fn resolve_image_url(base: Option<&Url>, raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        // Protocol-relative and path-relative sources need the page URL.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.and_then(|b| b.join(raw).ok()).map(|u| u.to_string())
        }
        Err(_) => None,
    }
}
