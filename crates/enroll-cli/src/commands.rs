//! Command handlers: the registration and list views.
//!
//! Each handler reports failures with the fixed user-facing message for
//! the error class and leaves all state as it was before the call.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use enroll_capture::{
    CameraSource, CaptureConstraints, CaptureSession, FacingMode,
};
use enroll_core::{AppConfig, AppError, PhotoAttachment, StudentDraft, StudentUpdate};
use enroll_directory::StudentDirectory;
use enroll_processing::{
    center_crop_region, crop_resize, derive_metadata, fit_frame, PhotoEncoder,
};

pub struct CaptureArgs {
    pub device: Option<String>,
    pub resolution: Option<String>,
    pub facing: Option<String>,
    pub zoom: Option<f32>,
    pub passport: bool,
    pub output: PathBuf,
}

fn parse_resolution(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| anyhow!("invalid resolution {}, expected WxH", s))?;
    Ok((w.parse()?, h.parse()?))
}

fn app_failure(err: AppError) -> anyhow::Error {
    eprintln!("{}", err.user_message());
    err.into()
}

pub async fn capture(
    config: &AppConfig,
    camera: Arc<dyn CameraSource>,
    args: CaptureArgs,
) -> Result<()> {
    let mut constraints = CaptureConstraints::new();
    if let Some(device) = args.device {
        constraints = constraints.device(device);
    }
    match args.resolution.as_deref() {
        Some(spec) => {
            let (w, h) = parse_resolution(spec)?;
            constraints = constraints.resolution(w, h);
        }
        None => {
            constraints = constraints.resolution(config.capture_width, config.capture_height);
        }
    }
    if let Some(facing) = args.facing.as_deref() {
        let mode = FacingMode::parse(facing)
            .ok_or_else(|| anyhow!("invalid facing mode {}, expected user|environment", facing))?;
        constraints = constraints.facing(mode);
    }

    let mut session = CaptureSession::new(camera);
    let frame = match session.start(&constraints).await {
        Ok(()) => {
            // Zoom is best-effort: a device without it still captures.
            if let Some(level) = args.zoom {
                session.set_zoom(level).await;
            }
            session.grab().await
        }
        Err(err) => Err(err),
    };
    let frame = match frame {
        Ok(frame) => frame,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return Err(err.into());
        }
    };
    session.stop().await;

    let img = frame.into_image()?;
    let img = fit_frame(&img, config.capture_width, config.capture_height)
        .map_err(app_failure)?;

    let img = if args.passport {
        let region = center_crop_region(
            img.width(),
            img.height(),
            config.passport_width,
            config.passport_height,
        )
        .map_err(app_failure)?;
        crop_resize(&img, &region, config.passport_width, config.passport_height)
            .map_err(app_failure)?
    } else {
        img
    };

    let uri = PhotoEncoder::encode_jpeg(&img, config.jpeg_quality).map_err(app_failure)?;
    let metadata = derive_metadata(&uri).map_err(app_failure)?;

    fs::write(&args.output, &uri)?;
    println!("photo written to {}", args.output.display());
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn register(
    config: &AppConfig,
    directory: &dyn StudentDirectory,
    name: String,
    code: String,
    class: String,
    phone: String,
    address: String,
    photo_path: PathBuf,
) -> Result<()> {
    let data_uri = fs::read_to_string(&photo_path)?.trim().to_string();
    if data_uri.len() > config.max_photo_bytes {
        return Err(app_failure(AppError::InvalidInput(format!(
            "photo exceeds {} bytes",
            config.max_photo_bytes
        ))));
    }

    // Metadata is derived fresh from the bytes being stored.
    let metadata = derive_metadata(&data_uri).map_err(app_failure)?;
    let draft = StudentDraft {
        full_name: name,
        student_code: code,
        class_name: class,
        phone,
        address,
        photo: Some(PhotoAttachment::with_metadata(data_uri, metadata)),
    };
    draft.validate_for_registration().map_err(app_failure)?;

    let record = directory.add(draft).await.map_err(app_failure)?;
    println!("Student registered successfully with id {}", record.id);
    Ok(())
}

pub async fn list(directory: &dyn StudentDirectory, format: &str) -> Result<()> {
    let students = directory.list().await.map_err(app_failure)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&students)?),
        "table" => {
            println!("{:<5} {:<24} {:<10} {:<10} {:<6}", "ID", "NAME", "CODE", "CLASS", "PHOTO");
            for s in &students {
                println!(
                    "{:<5} {:<24} {:<10} {:<10} {:<6}",
                    s.id,
                    s.full_name,
                    s.student_code,
                    s.class_name,
                    if s.photo.is_some() { "yes" } else { "no" }
                );
            }
            println!("{} student(s)", students.len());
        }
        other => return Err(anyhow!("invalid format {}, expected table|json", other)),
    }
    Ok(())
}

pub async fn show(directory: &dyn StudentDirectory, id: i64) -> Result<()> {
    let record = directory.get(id).await.map_err(app_failure)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    directory: &dyn StudentDirectory,
    id: i64,
    name: Option<String>,
    code: Option<String>,
    class: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    clear_photo: bool,
) -> Result<()> {
    let update = StudentUpdate {
        full_name: name,
        student_code: code,
        class_name: class,
        phone,
        address,
        photo: clear_photo.then_some(None),
    };
    if update.is_empty() {
        return Err(app_failure(AppError::InvalidInput(
            "nothing to update".to_string(),
        )));
    }
    let record = directory.update(id, update).await.map_err(app_failure)?;
    println!("Student {} updated", record.id);
    Ok(())
}

pub async fn remove(directory: &dyn StudentDirectory, id: i64) -> Result<()> {
    directory.remove(id).await.map_err(app_failure)?;
    println!("Student {} removed", id);
    Ok(())
}

/// Scripted end-to-end run against the in-process camera and directory.
pub async fn demo(
    config: &AppConfig,
    camera: Arc<dyn CameraSource>,
    directory: &dyn StudentDirectory,
) -> Result<()> {
    let mut session = CaptureSession::new(camera);
    session
        .start(
            &CaptureConstraints::new().resolution(config.capture_width, config.capture_height),
        )
        .await
        .map_err(|err| {
            eprintln!("{}", err.user_message());
            anyhow::Error::from(err)
        })?;

    let frame = session.grab().await?;
    session.stop().await;

    let img = frame.into_image()?;
    let region = center_crop_region(
        img.width(),
        img.height(),
        config.passport_width,
        config.passport_height,
    )
    .map_err(app_failure)?;
    let passport = crop_resize(&img, &region, config.passport_width, config.passport_height)
        .map_err(app_failure)?;

    let uri = PhotoEncoder::encode_jpeg(&passport, config.jpeg_quality).map_err(app_failure)?;
    let metadata = derive_metadata(&uri).map_err(app_failure)?;
    println!(
        "captured {}x{} photo, {} bytes encoded",
        metadata.width, metadata.height, metadata.size_bytes
    );

    let draft = StudentDraft {
        full_name: "Carol Mensah".to_string(),
        student_code: "STU003".to_string(),
        class_name: "Class C".to_string(),
        phone: "555-0303".to_string(),
        address: "789 Pine Rd".to_string(),
        photo: Some(PhotoAttachment::with_metadata(uri, metadata)),
    };
    draft.validate_for_registration().map_err(app_failure)?;
    let record = directory.add(draft).await.map_err(app_failure)?;
    println!("registered student id {}", record.id);

    list(directory, "table").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_capture::SyntheticCamera;
    use enroll_directory::InMemoryDirectory;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1280x720").unwrap(), (1280, 720));
        assert!(parse_resolution("1280").is_err());
        assert!(parse_resolution("axb").is_err());
    }

    #[tokio::test]
    async fn test_capture_writes_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("photo.uri");
        let config = AppConfig::default();

        capture(
            &config,
            Arc::new(SyntheticCamera::new()),
            CaptureArgs {
                device: None,
                resolution: Some("640x480".to_string()),
                facing: None,
                zoom: None,
                passport: true,
                output: output.clone(),
            },
        )
        .await
        .unwrap();

        let uri = fs::read_to_string(output).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let metadata = derive_metadata(&uri).unwrap();
        assert_eq!(
            (metadata.width, metadata.height),
            (config.passport_width, config.passport_height)
        );
    }

    #[tokio::test]
    async fn test_capture_with_zoom_on_plain_device() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("photo.uri");
        let config = AppConfig::default();

        // synthetic-back has no zoom; the capture still succeeds.
        capture(
            &config,
            Arc::new(SyntheticCamera::new()),
            CaptureArgs {
                device: Some("synthetic-back".to_string()),
                resolution: None,
                facing: None,
                zoom: Some(2.0),
                passport: false,
                output: output.clone(),
            },
        )
        .await
        .unwrap();

        let uri = fs::read_to_string(output).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_register_from_captured_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("photo.uri");
        let config = AppConfig::default();
        let directory = InMemoryDirectory::new();

        capture(
            &config,
            Arc::new(SyntheticCamera::new()),
            CaptureArgs {
                device: None,
                resolution: None,
                facing: None,
                zoom: None,
                passport: false,
                output: output.clone(),
            },
        )
        .await
        .unwrap();

        register(
            &config,
            &directory,
            "Dana Fox".to_string(),
            "STU010".to_string(),
            "Class D".to_string(),
            String::new(),
            String::new(),
            output,
        )
        .await
        .unwrap();

        let students = directory.list().await.unwrap();
        assert_eq!(students.len(), 1);
        assert!(students[0].photo.as_ref().unwrap().metadata.is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_code() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.uri");
        let config = AppConfig::default();
        let directory = InMemoryDirectory::new();

        capture(
            &config,
            Arc::new(SyntheticCamera::new()),
            CaptureArgs {
                device: None,
                resolution: None,
                facing: None,
                zoom: None,
                passport: false,
                output: photo.clone(),
            },
        )
        .await
        .unwrap();

        let result = register(
            &config,
            &directory,
            "Eve".to_string(),
            "bad code".to_string(),
            String::new(),
            String::new(),
            String::new(),
            photo,
        )
        .await;
        assert!(result.is_err());
        assert!(directory.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_demo_runs_end_to_end() {
        let config = AppConfig::default();
        let directory = InMemoryDirectory::with_seed_data();
        demo(&config, Arc::new(SyntheticCamera::new()), &directory)
            .await
            .unwrap();
        assert_eq!(directory.list().await.unwrap().len(), 3);
    }
}
