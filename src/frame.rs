// 该文件是 Kanjian （看见） 项目的一部分。
// src/frame.rs - RGBA 解码图像与 HWC 像素张量定义
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

const RGB_CHANNELS: usize = 3;
const RGBA_CHANNELS: usize = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
  #[error("数据长度不匹配: 期望长度 {expected}, 实际长度 {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("图像尺寸溢出: {width}x{height}")]
  ShapeOverflow { width: usize, height: usize },
}

fn expected_len(width: usize, height: usize, channels: usize) -> Result<usize, FrameError> {
  width
    .checked_mul(height)
    .and_then(|n| n.checked_mul(channels))
    .ok_or(FrameError::ShapeOverflow { width, height })
}

pub trait AsHwcFrame {
  fn as_hwc(&self) -> &[u8];
  /// [height, width, channels]
  fn shape(&self) -> [usize; 3];
}

/// 编解码器输出的原始图像，RGBA 交错排列
#[derive(Debug, Clone)]
pub struct RawDecodedImage {
  width: usize,
  height: usize,
  data: Box<[u8]>,
}

impl RawDecodedImage {
  pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
    let expected = expected_len(width, height, RGBA_CHANNELS)?;
    if data.len() != expected {
      return Err(FrameError::LengthMismatch {
        expected,
        actual: data.len(),
      });
    }

    Ok(Self {
      width,
      height,
      data: data.into_boxed_slice(),
    })
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn data(&self) -> &[u8] {
    &self.data
  }
}

/// 模型输入张量，形状为 [height, width, 3]，通道顺序 R,G,B
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbHwcFrame {
  width: usize,
  height: usize,
  data: Box<[u8]>,
}

impl RgbHwcFrame {
  pub fn with_data(height: usize, width: usize, data: Vec<u8>) -> Result<Self, FrameError> {
    let expected = expected_len(width, height, RGB_CHANNELS)?;
    if data.len() != expected {
      return Err(FrameError::LengthMismatch {
        expected,
        actual: data.len(),
      });
    }

    Ok(Self {
      width,
      height,
      data: data.into_boxed_slice(),
    })
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn channels(&self) -> usize {
    RGB_CHANNELS
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}

impl AsHwcFrame for RgbHwcFrame {
  fn as_hwc(&self) -> &[u8] {
    &self.data
  }

  fn shape(&self) -> [usize; 3] {
    [self.height, self.width, RGB_CHANNELS]
  }
}

impl From<&RawDecodedImage> for RgbHwcFrame {
  // 逐像素丢弃 alpha 通道
  fn from(image: &RawDecodedImage) -> Self {
    let pixels = image.width * image.height;
    let mut data = vec![0u8; pixels * RGB_CHANNELS];

    for (out, rgba) in data
      .chunks_exact_mut(RGB_CHANNELS)
      .zip(image.data.chunks_exact(RGBA_CHANNELS))
    {
      out.copy_from_slice(&rgba[..RGB_CHANNELS]);
    }

    Self {
      width: image.width,
      height: image.height,
      data: data.into_boxed_slice(),
    }
  }
}

impl From<RawDecodedImage> for RgbHwcFrame {
  fn from(image: RawDecodedImage) -> Self {
    RgbHwcFrame::from(&image)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn drops_alpha_channel_in_order() {
    let (w, h) = (3usize, 2usize);
    let data: Vec<u8> = (0..(w * h * 4) as u8).collect();
    let raw = RawDecodedImage::new(w, h, data.clone()).unwrap();

    let frame = RgbHwcFrame::from(&raw);

    assert_eq!(frame.len(), w * h * 3);
    assert_eq!(frame.shape(), [h, w, 3]);
    for k in 0..w * h {
      assert_eq!(&frame.as_hwc()[3 * k..3 * k + 3], &data[4 * k..4 * k + 3]);
    }
  }

  #[test]
  fn all_red_image_becomes_repeating_rgb() {
    let data = [255u8, 0, 0, 255].repeat(16);
    let raw = RawDecodedImage::new(4, 4, data).unwrap();

    let frame = RgbHwcFrame::from(raw);

    assert_eq!(frame.as_hwc(), [255u8, 0, 0].repeat(16).as_slice());
    assert_eq!(frame.len(), 48);
  }

  #[test]
  fn rejects_mismatched_lengths() {
    assert_eq!(
      RawDecodedImage::new(2, 2, vec![0; 15]).unwrap_err(),
      FrameError::LengthMismatch {
        expected: 16,
        actual: 15
      }
    );
    assert!(RgbHwcFrame::with_data(2, 2, vec![0; 16]).is_err());
    assert!(RgbHwcFrame::with_data(2, 2, vec![0; 12]).is_ok());
  }

  #[test]
  fn empty_image_is_empty_frame() {
    let raw = RawDecodedImage::new(0, 0, Vec::new()).unwrap();
    let frame = RgbHwcFrame::from(raw);
    assert!(frame.is_empty());
    assert_eq!(frame.shape(), [0, 0, 3]);
  }
}
