// 该文件是 Kanjian （看见） 项目的一部分。
// src/input.rs - 图像获取：选图器、字节读取与像素解码
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

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

mod decode;
pub use self::decode::{DecodeError, PixelDecoder};

mod file_fetch;
pub use self::file_fetch::FileFetch;

mod picker;
pub use self::picker::{FixedPicker, LinePicker, StdinPicker};

#[derive(Error, Debug)]
pub enum FetchError {
  #[error("无法解析图像地址 '{uri}': {reason}")]
  Resolve { uri: String, reason: String },
  #[error("URI 方案不匹配: 期望 '{expected}', 实际 '{found}'")]
  SchemeMismatch {
    expected: &'static str,
    found: String,
  },
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PickerError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("选图输入已关闭")]
  Closed,
}

/// 选图器可选择的媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MediaTypes {
  #[default]
  All,
  Images,
  Videos,
}

/// 原样传递给选图器的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
  pub media_types: MediaTypes,
  pub allows_editing: bool,
  /// [宽, 高]
  pub aspect: [u32; 2],
}

impl Default for PickerOptions {
  fn default() -> Self {
    Self {
      media_types: MediaTypes::All,
      allows_editing: true,
      aspect: [4, 3],
    }
  }
}

/// 已选中图像的引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
  uri: String,
}

impl ImageRef {
  pub fn new(uri: impl Into<String>) -> Self {
    Self { uri: uri.into() }
  }

  pub fn uri(&self) -> &str {
    &self.uri
  }

  /// 将引用解析为可读取的 URL；裸路径被视为本地文件
  pub fn resolve(&self) -> Result<Url, FetchError> {
    let resolve_error = |reason: String| FetchError::Resolve {
      uri: self.uri.clone(),
      reason,
    };

    match Url::parse(&self.uri) {
      Ok(url) => Ok(url),
      Err(url::ParseError::RelativeUrlWithoutBase) => {
        let path = std::path::absolute(&self.uri).map_err(|e| resolve_error(e.to_string()))?;
        Url::from_file_path(&path).map_err(|_| resolve_error("不是有效的文件路径".to_string()))
      }
      Err(e) => Err(resolve_error(e.to_string())),
    }
  }
}

impl std::fmt::Display for ImageRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.uri)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
  Cancelled,
  Picked(ImageRef),
}

#[async_trait]
pub trait ImagePicker: Send + Sync {
  async fn launch(&self, options: &PickerOptions) -> Result<PickResult, PickerError>;
}

#[async_trait]
pub trait Fetch: Send + Sync {
  async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}
