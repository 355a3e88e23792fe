//! # 复制与转换执行器
//!
//! 将来源文件逐字节复制到目标路径，或解码后按目标格式重新编码。
//!
//! ## 功能
//! - 复制时尽力保留修改时间
//! - JPEG 目标先展平为不透明 RGB，质量 95 编码
//! - 其他目标格式按扩展名交由 `image` 直接编码
//!
//! ## 依赖关系
//! - 被 `engine/run.rs` 调用
//! - 使用 `image` crate 进行编解码

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use serde::{Deserialize, Serialize};

use crate::error::{ImgcopyError, Result};

/// 支持的输出图片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// JPEG (flattened to RGB, quality 95)
    Jpg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// WebP
    Webp,
    /// Bitmap
    Bmp,
    /// TIFF
    Tiff,
}

impl ImageType {
    /// 文件扩展名（不含点号）
    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Jpg => "jpg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
            ImageType::Webp => "webp",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
        }
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// 逐字节复制来源文件
///
/// 尽力保留来源的修改时间；平台不支持时静默忽略。
pub fn copy_image(src: &Path, dest: &Path) -> Result<()> {
    let copy_err = |e: std::io::Error| ImgcopyError::CopyError {
        src: src.display().to_string(),
        dest: dest.display().to_string(),
        source: e,
    };

    let mtime = fs::metadata(src).and_then(|m| m.modified()).ok();
    fs::copy(src, dest).map_err(copy_err)?;

    if let Some(mtime) = mtime {
        if let Ok(f) = File::options().write(true).open(dest) {
            let _ = f.set_modified(mtime);
        }
    }

    Ok(())
}

/// 解码来源图片并按目标路径扩展名重新编码
///
/// JPEG 目标无法表示透明通道或调色板模式，先展平为不透明 RGB，
/// 再以质量 95（无色度二次采样）编码；其他格式保留原生表示直接编码。
pub fn convert_image(src: &Path, dest: &Path) -> Result<()> {
    let conv_err = |reason: String| ImgcopyError::ConversionError {
        src: src.display().to_string(),
        dest: dest.display().to_string(),
        reason,
    };

    let img = image::open(src).map_err(|e| conv_err(e.to_string()))?;

    let dest_ext = dest
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if dest_ext == "jpg" || dest_ext == "jpeg" {
        let rgb = img.into_rgb8();
        let file = File::create(dest).map_err(|e| conv_err(e.to_string()))?;
        let writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(writer, 95);
        rgb.write_with_encoder(encoder)
            .map_err(|e| conv_err(e.to_string()))?;
    } else {
        img.save(dest).map_err(|e| conv_err(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.png");
        let dest = dir.path().join("dest.png");
        let payload = vec![7u8; 2048];
        fs::write(&src, &payload).unwrap();

        // 给来源一个过去的修改时间，排除"恰好同时写入"的巧合
        let past = std::time::SystemTime::now() - std::time::Duration::from_secs(86_400);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        copy_image(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), payload);
        assert_eq!(
            fs::metadata(&src).unwrap().len(),
            fs::metadata(&dest).unwrap().len()
        );
        assert_eq!(
            fs::metadata(&src).unwrap().modified().unwrap(),
            fs::metadata(&dest).unwrap().modified().unwrap()
        );
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_image(
            &dir.path().join("vanished.png"),
            &dir.path().join("out.png"),
        );
        assert!(matches!(result, Err(ImgcopyError::CopyError { .. })));
    }

    #[test]
    fn test_convert_rgba_png_to_jpg() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("alpha.png");
        let dest = dir.path().join("alpha.jpg");

        let mut img = RgbaImage::new(8, 8);
        for p in img.pixels_mut() {
            *p = Rgba([255, 0, 0, 128]);
        }
        img.save(&src).unwrap();

        convert_image(&src, &dest).unwrap();

        // 输出必须是无透明通道的可解码 JPEG
        let out = image::open(&dest).unwrap();
        assert_eq!(out.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_convert_corrupt_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("broken.png");
        fs::write(&src, b"not an image at all").unwrap();

        let result = convert_image(&src, &dir.path().join("out.jpg"));
        assert!(matches!(result, Err(ImgcopyError::ConversionError { .. })));
    }

    #[test]
    fn test_image_type_extensions() {
        assert_eq!(ImageType::Jpg.extension(), "jpg");
        assert_eq!(ImageType::Png.extension(), "png");
        assert_eq!(format!("{}", ImageType::Gif), ".gif");
    }
}
