// 该文件是 Kanjian （看见） 项目的一部分。
// src/output/save_image_file.rs - 保存标注了检测框的图像文件
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

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  input::ImageRef,
  model::Prediction,
  output::Render,
};

const BBOX_COLOR: [u8; 3] = [0, 0, 255]; // 蓝色

pub struct SaveImageFileOutput {
  path: String,
  color: [u8; 3],
}

#[derive(Error, Debug)]
pub enum SaveImageFileError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("无法读取源图像: {0}")]
  SourceUnavailable(String),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for SaveImageFileOutput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(SaveImageFileError::SchemeMismatch(format!(
        "期望保存方式 '{}', 实际保存方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    let path = urlencoding::decode(uri.path())
      .map(|p| p.into_owned())
      .unwrap_or_else(|_| uri.path().to_string());
    Ok(SaveImageFileOutput {
      path,
      color: BBOX_COLOR,
    })
  }
}

/// 将 [x, y, width, height] 像素坐标裁剪到图像范围内
fn clamp_bbox(bbox: &[f32; 4], width: u32, height: u32) -> Option<Rect> {
  let (w, h) = (width as f32, height as f32);
  let x_min = bbox[0].floor().clamp(0.0, w);
  let y_min = bbox[1].floor().clamp(0.0, h);
  let x_max = (bbox[0] + bbox[2]).ceil().clamp(0.0, w);
  let y_max = (bbox[1] + bbox[3]).ceil().clamp(0.0, h);

  if x_max - x_min < 1.0 || y_max - y_min < 1.0 {
    return None;
  }

  Some(Rect::at(x_min as i32, y_min as i32).of_size((x_max - x_min) as u32, (y_max - y_min) as u32))
}

impl SaveImageFileOutput {
  fn load_source(image: &ImageRef) -> Result<RgbImage, SaveImageFileError> {
    let url = image
      .resolve()
      .map_err(|e| SaveImageFileError::SourceUnavailable(e.to_string()))?;
    let path = url
      .to_file_path()
      .map_err(|_| SaveImageFileError::SourceUnavailable(url.to_string()))?;
    Ok(image::open(path)?.to_rgb8())
  }

  fn draw_detection(&self, image: &mut RgbImage, predictions: &[Prediction]) {
    let (width, height) = image.dimensions();
    for prediction in predictions {
      match clamp_bbox(&prediction.bbox, width, height) {
        Some(rect) => draw_hollow_rect_mut(image, rect, Rgb(self.color)),
        None => debug!("跳过超出图像范围的检测框: {:?}", prediction.bbox),
      }
    }
  }

  fn save_image(&self, image: RgbImage) -> Result<(), SaveImageFileError> {
    if let Some(parent) = Path::new(&self.path).parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    image.save(&self.path)?;

    warn!("保存图像到文件: {}", self.path);

    Ok(())
  }
}

impl Render for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn render_result(&self, image: &ImageRef, predictions: &[Prediction]) -> Result<(), Self::Error> {
    let mut canvas = Self::load_source(image)?;
    self.draw_detection(&mut canvas, predictions);
    self.save_image(canvas)
  }
}
