// 该文件是 Kanjian （看见） 项目的一部分。
// src/input/decode.rs - 压缩图像字节到 RGB 张量的解码
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use thiserror::Error;
use tracing::debug;

use crate::frame::{FrameError, RawDecodedImage, RgbHwcFrame};

#[derive(Error, Debug)]
pub enum DecodeError {
  #[error("图像数据为空")]
  Empty,
  #[error("图像解码错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("图像数据错误: {0}")]
  FrameError(#[from] FrameError),
}

/// 像素解码器，无状态，结果只依赖输入字节
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelDecoder;

impl PixelDecoder {
  pub fn decode_raw(&self, bytes: &[u8]) -> Result<RawDecodedImage, DecodeError> {
    if bytes.is_empty() {
      return Err(DecodeError::Empty);
    }

    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    debug!("解码图像尺寸: {}x{}", width, height);

    Ok(RawDecodedImage::new(
      width as usize,
      height as usize,
      image.into_raw(),
    )?)
  }

  pub fn decode(&self, bytes: &[u8]) -> Result<RgbHwcFrame, DecodeError> {
    let raw = self.decode_raw(bytes)?;
    Ok(RgbHwcFrame::from(raw))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use image::{ImageFormat, Rgba, RgbaImage};

  use super::*;
  use crate::frame::AsHwcFrame;

  fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
      .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
      .unwrap();
    bytes
  }

  #[test]
  fn decodes_red_png_to_rgb_tensor() {
    let image = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));

    let frame = PixelDecoder.decode(&encode_png(&image)).unwrap();

    assert_eq!(frame.shape(), [4, 4, 3]);
    assert_eq!(frame.as_hwc(), [255u8, 0, 0].repeat(16).as_slice());
  }

  #[test]
  fn keeps_rgb_of_translucent_pixels() {
    let mut image = RgbaImage::new(2, 3);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
      *pixel = Rgba([x as u8 * 10, y as u8 * 20, 7, 128]);
    }

    let raw = PixelDecoder.decode_raw(&encode_png(&image)).unwrap();
    let frame = RgbHwcFrame::from(&raw);

    assert_eq!(frame.shape(), [3, 2, 3]);
    for k in 0..6 {
      assert_eq!(
        &frame.as_hwc()[3 * k..3 * k + 3],
        &raw.data()[4 * k..4 * k + 3]
      );
    }
    // 第二行第二列
    assert_eq!(&frame.as_hwc()[9..12], &[10, 20, 7]);
  }

  #[test]
  fn empty_buffer_is_decode_error() {
    assert!(matches!(PixelDecoder.decode(&[]), Err(DecodeError::Empty)));
  }

  #[test]
  fn malformed_buffer_is_decode_error() {
    let garbage = b"definitely not an encoded image";
    assert!(matches!(
      PixelDecoder.decode(garbage),
      Err(DecodeError::ImageError(_))
    ));
  }
}
