//! Capture Page Demo
//!
//! Drives the whole photo page headlessly: the camera capture journey,
//! a denied-permission path, the upload preview, the password meter and
//! flash dismissal, all against the recording surface and mock devices.

use std::sync::Arc;
use std::time::Duration;

use smilesphere::{
    password, MockMediaDevices, PhotoPage, RecordingSurface, WidgetEvent, WidgetState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("📸 SmileSphere Capture Page Demo");
    println!("================================");

    // Demo 1: The happy-path camera journey
    println!("\n🎥 Demo 1: Camera Capture Journey");
    let mut page = PhotoPage::builder(RecordingSurface::new())
        .devices(Arc::new(MockMediaDevices::granting(640, 480)))
        .build()?;

    page.dispatch(WidgetEvent::CameraTabSelected);
    page.settle().await;
    println!("✅ Camera granted, widget is {:?}", page.capture_state());

    page.dispatch(WidgetEvent::CaptureRequested);
    let field = page
        .surface()
        .captured_field()
        .map(|url| &url[..40.min(url.len())])
        .unwrap_or("<empty>");
    println!("✅ Still captured into the form field: {}...", field);

    page.dispatch(WidgetEvent::RetakeRequested);
    println!("✅ Retake puts the widget back to {:?}", page.capture_state());

    page.dispatch(WidgetEvent::PageUnloading);
    println!("✅ Page unload released the camera");

    // Demo 2: Permission denied
    println!("\n🚫 Demo 2: Permission Denied");
    let mut denied = PhotoPage::builder(RecordingSurface::new())
        .devices(Arc::new(MockMediaDevices::denying()))
        .build()?;

    denied.dispatch(WidgetEvent::CameraTabSelected);
    denied.settle().await;
    assert_eq!(denied.capture_state(), WidgetState::Idle);
    for notice in denied.surface().alerts() {
        println!("⚠️  Alert shown: {}", notice.message());
    }

    // Demo 3: Upload preview
    println!("\n🖼️  Demo 3: Upload Preview");
    let preview = page.preview_file("vacation.png", &[137, 80, 78, 71]);
    println!(
        "✅ Previewing {} as {} ({} bytes of data URL)",
        preview.name(),
        preview.mime(),
        preview.data_url().len()
    );
    page.clear_preview();
    println!("✅ Selection cleared, preview hidden");

    // Demo 4: Password strength meter
    println!("\n🔐 Demo 4: Password Strength Meter");
    for candidate in ["short", "longenough", "BothCases1", "BothCases1!"] {
        let meter = password::meter(password::score(candidate));
        println!(
            "   {:<12} -> {:>9} ({}%)",
            candidate, meter.label, meter.width_percent
        );
    }

    // Demo 5: Flash banner dismissal
    println!("\n💬 Demo 5: Flash Banner Dismissal");
    let mut flashed = PhotoPage::builder(RecordingSurface::new())
        .devices(Arc::new(MockMediaDevices::unsupported()))
        .flash_dismiss_after(Duration::from_millis(50))
        .build()?;

    flashed.register_flash();
    flashed.register_flash();
    println!("   {} banners up at page init", flashed.open_flash_count());
    let closed = flashed.dismiss_due_flashes(Duration::from_millis(50));
    println!("✅ {} banners auto-dismissed after the delay", closed.len());

    println!("\n✨ Capture page demo completed!");
    Ok(())
}
