//! End-to-end runs against a mock presentation site
//!
//! The converter is replaced by [`common::RecordingAssembler`] so these tests
//! need no ImageMagick install. `real_imagemagick_builds_pdf` covers the real
//! converter and is ignored by default.
//!
//! Run with: cargo test --test end_to_end

mod common;

use common::*;
use slidegrab::{Error, Event, Pipeline, Stage, ToExitCode};
use std::sync::Arc;

#[tokio::test]
async fn three_slides_with_retention() {
    let site = SlideSite::with_slides(3).await;
    let assembler = Arc::new(RecordingAssembler::default());
    let mut pipeline = Pipeline::with_assembler(site.config(true), assembler.clone()).unwrap();

    let report = pipeline.run().await.unwrap();

    let expected_output = site.out_dir().join("my-talk-by-author123.pdf");
    assert_eq!(report.output.path, expected_output);
    assert_eq!(report.slide_count, 3);
    assert!(expected_output.is_file());
    assert_eq!(pipeline.stage(), Stage::Done);

    // One document, built from the three slides in order
    assert_eq!(
        assembler.calls(),
        vec![vec!["slide-1.jpg", "slide-2.jpg", "slide-3.jpg"]]
    );
    let document = std::fs::read_to_string(&expected_output).unwrap();
    assert!(document.starts_with("quality=100\n"));

    // Retained folder sits next to the document and holds exactly the slides
    let retained = site.out_dir().join("my-talk-by-author123");
    assert_eq!(report.retained_dir.as_deref(), Some(retained.as_path()));
    assert_eq!(
        file_names(&retained),
        vec!["slide-1.jpg", "slide-2.jpg", "slide-3.jpg"]
    );
    assert_eq!(
        std::fs::read(retained.join("slide-2.jpg")).unwrap(),
        slide_bytes(2)
    );
    assert_eq!(
        file_names(&site.out_dir()),
        vec!["my-talk-by-author123", "my-talk-by-author123.pdf"]
    );

    assert_no_working_area(&site.work_root());
}

#[tokio::test]
async fn without_retention_only_the_document_is_written() {
    let site = SlideSite::with_slides(2).await;
    let assembler = Arc::new(RecordingAssembler::default());
    let mut pipeline = Pipeline::with_assembler(site.config(false), assembler).unwrap();

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.retained_dir, None);
    assert_eq!(
        file_names(&site.out_dir()),
        vec!["my-talk-by-author123.pdf"]
    );
    assert_no_working_area(&site.work_root());
}

#[tokio::test]
async fn twelve_slides_are_assembled_in_numeric_order() {
    let site = SlideSite::with_slides(12).await;
    let assembler = Arc::new(RecordingAssembler::default());
    let mut pipeline = Pipeline::with_assembler(site.config(false), assembler.clone()).unwrap();

    pipeline.run().await.unwrap();

    let expected: Vec<String> = (1..=12).map(|i| format!("slide-{i}.jpg")).collect();
    assert_eq!(assembler.calls(), vec![expected]);
}

#[tokio::test]
async fn normal_resolution_is_used_when_full_is_absent() {
    let site = SlideSite::start().await;
    site.serve_page(2, "data-normal").await;
    site.serve_slide(1).await;
    site.serve_slide(2).await;
    let assembler = Arc::new(RecordingAssembler::default());
    let mut pipeline = Pipeline::with_assembler(site.config(false), assembler.clone()).unwrap();

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.slide_count, 2);
    assert_eq!(assembler.calls(), vec![vec!["slide-1.jpg", "slide-2.jpg"]]);
}

#[tokio::test]
async fn download_failure_removes_working_area() {
    let site = SlideSite::start().await;
    site.serve_page(4, "data-full").await;
    site.serve_slide(1).await;
    site.serve_slide(2).await;
    site.fail_slide(3, 500).await;
    site.serve_slide(4).await;

    let assembler = Arc::new(RecordingAssembler::default());
    let mut pipeline = Pipeline::with_assembler(site.config(true), assembler.clone()).unwrap();
    let mut events = pipeline.subscribe();

    let err = pipeline.run().await.unwrap_err();

    match &err {
        Error::SlideDownloadFailed { index, url, .. } => {
            assert_eq!(*index, 3);
            assert_eq!(url, &site.slide_url(3));
        }
        other => panic!("expected SlideDownloadFailed, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 5);
    assert_eq!(pipeline.stage(), Stage::ImagesExtracted);

    // Nothing assembled, nothing retained, nothing left behind
    assert!(assembler.calls().is_empty());
    assert!(file_names(&site.out_dir()).is_empty());
    assert_no_working_area(&site.work_root());

    // Slide 4 was never requested
    let requested: Vec<String> = site
        .server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert!(!requested.iter().any(|p| p.contains("slide-4")));

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    assert!(matches!(
        last,
        Some(Event::Failed {
            stage: Stage::ImagesExtracted,
            ..
        })
    ));
}

#[tokio::test]
async fn unreachable_page_exits_with_page_unreachable() {
    let site = SlideSite::start().await;
    let mut pipeline =
        Pipeline::with_assembler(site.config(false), Arc::new(RecordingAssembler::default()))
            .unwrap();

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::PageUnreachable { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains(&site.page_url()));
    assert_no_working_area(&site.work_root());
}

#[tokio::test]
async fn page_without_slides_exits_with_no_slides_found() {
    let site = SlideSite::start().await;
    site.serve_page(0, "data-full").await;
    let mut pipeline =
        Pipeline::with_assembler(site.config(false), Arc::new(RecordingAssembler::default()))
            .unwrap();

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::NoSlidesFound { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_no_working_area(&site.work_root());
}

#[tokio::test]
async fn default_output_name_is_derived_from_url() {
    let site = SlideSite::start().await;
    let config = slidegrab::Config::new(site.page_url(), None).unwrap();
    assert_eq!(
        config.output.path,
        std::path::Path::new("downloads").join("my-talk-by-author123.pdf")
    );
}

#[tokio::test]
async fn progress_events_follow_the_run() {
    let site = SlideSite::with_slides(2).await;
    let mut pipeline =
        Pipeline::with_assembler(site.config(true), Arc::new(RecordingAssembler::default()))
            .unwrap();
    let mut events = pipeline.subscribe();

    pipeline.run().await.unwrap();

    let mut messages = Vec::new();
    while let Ok(event) = events.try_recv() {
        messages.push(event.to_string());
    }
    assert_eq!(messages.len(), 7, "unexpected events: {messages:?}");
    assert!(messages[0].starts_with("Reading slide page"));
    assert_eq!(messages[1], "Found 2 slides");
    assert_eq!(messages[2], "Downloading slide 1 of 2...");
    assert_eq!(messages[3], "Downloading slide 2 of 2...");
    assert_eq!(messages[4], "Converting to PDF with 'recording'...");
    assert!(messages[5].starts_with("Create new folder and copy files to"));
    assert!(messages[6].starts_with("Your file has been successfully created at"));
}

#[tokio::test]
#[ignore = "requires ImageMagick on PATH"]
async fn real_imagemagick_builds_pdf() {
    let site = SlideSite::start().await;
    site.serve_page(2, "data-full").await;
    for index in 1..=2u32 {
        let image = tiny_image();
        wiremock::Mock::given(wiremock::matchers::path(format!(
            "/images/slide-{index}-1024.jpg"
        )))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_bytes(image))
        .mount(&site.server)
        .await;
    }

    let mut pipeline = Pipeline::new(site.config(false)).unwrap();
    let report = pipeline.run().await.unwrap();

    let bytes = std::fs::read(&report.output.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_no_working_area(&site.work_root());
}

/// 1x1 white image; ImageMagick identifies it by content, not extension
fn tiny_image() -> Vec<u8> {
    b"P3\n1 1\n255\n255 255 255\n".to_vec()
}
