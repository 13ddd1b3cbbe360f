// 该文件是 Kanjian （看见） 项目的一部分。
// src/output/json_record.rs - 以 JSON 记录检测结果
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

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  input::ImageRef,
  model::Prediction,
  output::Render,
};

#[derive(Error, Debug)]
pub enum JsonRecordOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Record<'a> {
  image: &'a str,
  recorded_at: String,
  predictions: &'a [Prediction],
}

pub struct JsonRecordOutput {
  path: PathBuf,
}

impl FromUrlWithScheme for JsonRecordOutput {
  const SCHEME: &'static str = "json";
}

impl FromUrl for JsonRecordOutput {
  type Error = JsonRecordOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(JsonRecordOutputError::SchemeMismatch);
    }

    let path = urlencoding::decode(uri.path())
      .map(|p| PathBuf::from(p.as_ref()))
      .unwrap_or_else(|_| PathBuf::from(uri.path()));
    Ok(JsonRecordOutput { path })
  }
}

impl JsonRecordOutput {
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Render for JsonRecordOutput {
  type Error = JsonRecordOutputError;

  fn render_result(&self, image: &ImageRef, predictions: &[Prediction]) -> Result<(), Self::Error> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let record = Record {
      image: image.uri(),
      recorded_at: Utc::now().to_rfc3339(),
      predictions,
    };
    let file = std::fs::File::create(&self.path)?;
    serde_json::to_writer_pretty(file, &record)?;

    info!("保存检测记录到文件: {}", self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_record_with_predictions() {
    let path = std::env::temp_dir().join("kanjian-json-record").join("out.json");
    let url = Url::from_file_path(&path).unwrap();
    let url = Url::parse(&format!("json://{}", url.path())).unwrap();
    let output = JsonRecordOutput::from_url(&url).unwrap();
    assert_eq!(output.path(), path.as_path());

    let predictions = vec![Prediction::new("apple", 0.9, [0.0, 0.0, 1.0, 1.0])];
    output
      .render_result(&ImageRef::new("red.png"), &predictions)
      .unwrap();

    let written: serde_json::Value =
      serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["image"], "red.png");
    assert_eq!(written["predictions"][0]["class"], "apple");
    assert!(written["recorded_at"].as_str().is_some());
    let _ = std::fs::remove_file(path);
  }
}
