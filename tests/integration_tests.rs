use image::{ImageBuffer, Rgba};
use pixel_stash::{
    RasterBuffer, StegoError,
    capacity::max_bytes,
    cli::{CapacityArgs, HideArgs, RecoverArgs},
    decode,
    handler::{handle_capacity, handle_hide, handle_recover},
    storage::load_raster,
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], chunk[3]]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_path = dir.path().join("source.bin");
    let recovered_path = dir.path().join("recovered.bin");

    create_test_image(&original_image_path, 100, 100);
    let original = random_bytes(1000);
    fs::write(&source_path, &original)?;

    // 2. 测试 handle_hide
    handle_hide(HideArgs {
        image: original_image_path.clone(),
        payload: source_path.clone(),
        name: None,
        dest: Some(hidden_image_path.clone()),
        force: false,
    })?;
    assert!(hidden_image_path.exists(), "Hidden image should be created.");

    // 3. 测试 handle_recover
    handle_recover(RecoverArgs {
        image: hidden_image_path.clone(),
        dest: Some(recovered_path.clone()),
        force: false,
    })?;

    // 4. 验证结果
    assert_eq!(fs::read(&recovered_path)?, original);
    assert_eq!(decode(&load_raster(&hidden_image_path)?)?.name, "source.bin");

    Ok(())
}

/// 验证不提供输出路径时，默认路径的生成
#[test]
fn test_handle_hide_and_recover_with_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_path = dir.path().join("notes.txt");

    create_test_image(&original_image_path, 64, 64);
    fs::write(&source_path, "Testing default path generation.")?;

    handle_hide(HideArgs {
        image: original_image_path.clone(),
        payload: source_path.clone(),
        name: None,
        dest: None,
        force: false,
    })?;

    let expected_hidden_path = dir.path().join("hidden_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    handle_recover(RecoverArgs {
        image: expected_hidden_path,
        dest: None,
        force: false,
    })?;

    let expected_recovered_path = dir.path().join("recovered_notes.txt");
    assert_eq!(
        fs::read_to_string(&expected_recovered_path)?,
        "Testing default path generation."
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&payload_path, "some text")?;
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let args = |force| HideArgs {
        image: image_path.clone(),
        payload: payload_path.clone(),
        name: None,
        dest: Some(dest_path.clone()),
        force,
    };

    let result = handle_hide(args(false));
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }
    assert_eq!(fs::read(&dest_path)?, b"this is a dummy file to be overwritten");

    handle_hide(args(true))?;
    assert_ne!(fs::read(&dest_path)?, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，且不会留下输出文件
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let payload_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 10, 10);
    fs::write(&payload_path, "a".repeat(5000))?;

    let result = handle_hide(HideArgs {
        image: image_path,
        payload: payload_path,
        name: None,
        dest: Some(dest_path.clone()),
        force: false,
    });

    let err = result.expect_err("hiding 5000 bytes in 100 pixels must fail");
    assert!(err.to_string().contains("Not enough space"));
    assert_eq!(
        err.downcast_ref::<StegoError>(),
        Some(&StegoError::CapacityExceeded {
            requested: 5000,
            max: 11
        })
    );
    assert!(!dest_path.exists(), "No partial output may be left behind.");

    Ok(())
}

/// 验证 100x100 图像的容量边界
#[test]
fn test_capacity_boundary_on_hundred_square() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("carrier.png");
    create_test_image(&image_path, 100, 100);
    let carrier: RasterBuffer = load_raster(&image_path)?;

    assert_eq!(max_bytes(&carrier), 1249);
    assert_eq!(
        pixel_stash::encode(&vec![0u8; 1250], "n", &carrier),
        Err(StegoError::CapacityExceeded {
            requested: 1250,
            max: 1249
        })
    );

    // 1250 个可用字节减去 8 字节长度字段和 1 字节名称。
    let payload = random_bytes(1241);
    let hidden = pixel_stash::encode(&payload, "n", &carrier)?;
    assert_eq!(decode(&hidden)?.payload, payload);

    handle_capacity(CapacityArgs {
        image: image_path,
        name: Some("n".to_owned()),
    })?;
    Ok(())
}

/// 验证非 ASCII 名称被拒绝
#[test]
fn test_non_ascii_name_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.txt");
    create_test_image(&image_path, 40, 40);
    fs::write(&payload_path, "x")?;

    let err = handle_hide(HideArgs {
        image: image_path,
        payload: payload_path,
        name: Some("名字.txt".to_owned()),
        dest: None,
        force: false,
    })
    .expect_err("non-ASCII names must be rejected");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::NonAsciiName(_))
    ));
    Ok(())
}

/// 验证无法解码的载体文件
#[test]
fn test_unsupported_carrier() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("not_an_image.png");
    fs::write(&image_path, "plain text")?;

    let err = handle_recover(RecoverArgs {
        image: image_path,
        dest: None,
        force: false,
    })
    .expect_err("garbage must not decode");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::UnsupportedCarrierFormat(_))
    ));
    Ok(())
}

/// 验证多种数据长度与名称下的往返一致性，以及只改变最低位的性质
#[test]
fn test_round_trip_preserves_upper_bits() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("carrier.png");
    create_test_image(&image_path, 80, 60);
    let carrier = load_raster(&image_path)?;

    for (len, name) in [(0, ""), (1, "a"), (37, "report.pdf"), (500, "x.bin")] {
        let payload = random_bytes(len);
        let hidden = pixel_stash::encode(&payload, name, &carrier)?;
        let recovered = decode(&hidden)?;
        assert_eq!(recovered.name, name);
        assert_eq!(recovered.payload, payload);

        let touched = ((len + 2 * (8 + name.len())) * 8) as u64;
        for i in 0..touched.min(carrier.pixel_count()) {
            let (x, y) = carrier.coordinate(i);
            let before = carrier.rgb(x, y).map(|c| c & 0xFE);
            let after = hidden.rgb(x, y).map(|c| c & 0xFE);
            assert_eq!(before, after);
            assert_eq!(hidden.alpha(x, y), 255);
        }
    }
    Ok(())
}
