// 该文件是 Kanjian （看见） 项目的一部分。
// src/screen/pipeline.rs - 读取、解码、检测流水线
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

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
  input::{DecodeError, Fetch, FetchError, ImageRef, PixelDecoder},
  model::{Detector, ModelError, Prediction},
};

#[derive(Error, Debug)]
pub enum DetectionError {
  #[error("图像读取错误: {0}")]
  FetchError(#[from] FetchError),
  #[error("图像解码错误: {0}")]
  DecodeError(#[from] DecodeError),
  #[error("模型推理错误: {0}")]
  ModelError(#[from] ModelError),
}

pub async fn detect_objects(
  image: &ImageRef,
  fetch: &dyn Fetch,
  decoder: &PixelDecoder,
  model: &dyn Detector,
) -> Result<Vec<Prediction>, DetectionError> {
  let url = image.resolve()?;
  debug!("读取图像: {}", url);
  let bytes = fetch.fetch(&url).await?;

  let frame = decoder.decode(&bytes)?;
  debug!("输入张量形状: {}x{}x{}", frame.height(), frame.width(), frame.channels());

  let now = Instant::now();
  let predictions = model.detect(&frame).await?;
  info!(
    "推理完成，耗时: {:.2?}，检测到 {} 个物体",
    now.elapsed(),
    predictions.len()
  );

  Ok(predictions)
}
