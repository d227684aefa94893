//! Presentation page fixtures served from a local mock server

use slidegrab::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Author segment of every fixture page URL
pub const AUTHOR: &str = "author123";

/// Title segment of every fixture page URL
pub const TITLE: &str = "my-talk";

/// Page HTML with one `slide_image` per URL, using the given resolution attribute
pub fn slide_page(image_urls: &[String], attribute: &str) -> String {
    let images: String = image_urls
        .iter()
        .map(|url| format!("      <img class=\"slide_image\" {attribute}=\"{url}\" alt=\"slide\">\n"))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>{TITLE}</title></head>
  <body>
    <div class="slide_container">
{images}    </div>
  </body>
</html>"#
    )
}

/// Fake JPEG bytes identifying slide `index`
pub fn slide_bytes(index: u32) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(format!("slide {index}").as_bytes());
    bytes
}

/// A mock presentation site plus scratch directories for one test
pub struct SlideSite {
    /// Server hosting the page and the images
    pub server: MockServer,
    /// Root of the scratch space
    pub temp: TempDir,
}

impl SlideSite {
    /// Start an empty site
    pub async fn start() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("work")).unwrap();
        Self {
            server: MockServer::start().await,
            temp,
        }
    }

    /// Start a site serving `count` full-resolution slides
    pub async fn with_slides(count: u32) -> Self {
        let site = Self::start().await;
        site.serve_page(count, "data-full").await;
        for index in 1..=count {
            site.serve_slide(index).await;
        }
        site
    }

    /// URL of the presentation page
    pub fn page_url(&self) -> String {
        format!("{}/{AUTHOR}/{TITLE}", self.server.uri())
    }

    /// URL of slide `index`
    pub fn slide_url(&self, index: u32) -> String {
        format!("{}/images/slide-{index}-1024.jpg", self.server.uri())
    }

    /// Serve the page listing `count` slides under `attribute`
    pub async fn serve_page(&self, count: u32, attribute: &str) {
        let urls: Vec<String> = (1..=count).map(|i| self.slide_url(i)).collect();
        Mock::given(method("GET"))
            .and(path(format!("/{AUTHOR}/{TITLE}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(slide_page(&urls, attribute)),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve slide `index` successfully
    pub async fn serve_slide(&self, index: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/images/slide-{index}-1024.jpg")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(slide_bytes(index)),
            )
            .mount(&self.server)
            .await;
    }

    /// Make slide `index` fail with `status`
    pub async fn fail_slide(&self, index: u32, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/images/slide-{index}-1024.jpg")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Parent directory of every working area created by the test
    pub fn work_root(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Directory receiving documents
    pub fn out_dir(&self) -> PathBuf {
        self.temp.path().join("out")
    }

    /// Configuration writing into [`SlideSite::out_dir`]
    ///
    /// A trailing separator makes the output a directory, so the document
    /// name is derived from the page URL.
    pub fn config(&self, retain_images: bool) -> Config {
        let out = format!("{}/", self.out_dir().display());
        let mut config = Config::new(self.page_url(), Some(Path::new(&out))).unwrap();
        config.output.retain_images = retain_images;
        config.work_dir = Some(self.work_root());
        config
    }
}
