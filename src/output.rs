// 该文件是 Kanjian （看见） 项目的一部分。
// src/output.rs - 界面视图与检测结果输出
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
use url::Url;

use crate::input::ImageRef;
use crate::model::Prediction;
use crate::{FromUrl, FromUrlWithScheme};

pub trait Render: Sized {
  type Error;
  fn render_result(&self, image: &ImageRef, predictions: &[Prediction]) -> Result<(), Self::Error>;
}

mod view;
pub use self::view::{ModelIndicator, ScreenView};

mod console;
pub use self::console::ConsoleOutput;

#[cfg(feature = "json_record")]
mod json_record;
#[cfg(feature = "json_record")]
pub use self::json_record::{JsonRecordOutput, JsonRecordOutputError};

#[cfg(feature = "save_image_file")]
mod save_image_file;
#[cfg(feature = "save_image_file")]
pub use self::save_image_file::{SaveImageFileError, SaveImageFileOutput};

#[derive(Error, Debug)]
pub enum OutputError {
  #[cfg(feature = "json_record")]
  #[error("JSON 记录输出错误: {0}")]
  JsonRecordOutputError(#[from] JsonRecordOutputError),
  #[cfg(feature = "save_image_file")]
  #[error("保存图像文件错误: {0}")]
  SaveImageFileError(#[from] SaveImageFileError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum OutputWrapper {
  Console(ConsoleOutput),
  #[cfg(feature = "json_record")]
  JsonRecordOutput(JsonRecordOutput),
  #[cfg(feature = "save_image_file")]
  SaveImageFileOutput(SaveImageFileOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      ConsoleOutput::SCHEME => {
        let output = match ConsoleOutput::from_url(url) {
          Ok(output) => output,
          Err(e) => match e {},
        };
        Ok(OutputWrapper::Console(output))
      }
      #[cfg(feature = "json_record")]
      JsonRecordOutput::SCHEME => {
        let output = JsonRecordOutput::from_url(url)?;
        Ok(OutputWrapper::JsonRecordOutput(output))
      }
      #[cfg(feature = "save_image_file")]
      SaveImageFileOutput::SCHEME => {
        let output = SaveImageFileOutput::from_url(url)?;
        Ok(OutputWrapper::SaveImageFileOutput(output))
      }
      other => Err(OutputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl Render for OutputWrapper {
  type Error = OutputError;

  fn render_result(&self, image: &ImageRef, predictions: &[Prediction]) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => {
        output.render_result(image, predictions).map_err(|e| match e {})
      }
      #[cfg(feature = "json_record")]
      OutputWrapper::JsonRecordOutput(output) => output
        .render_result(image, predictions)
        .map_err(OutputError::from),
      #[cfg(feature = "save_image_file")]
      OutputWrapper::SaveImageFileOutput(output) => output
        .render_result(image, predictions)
        .map_err(OutputError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selects_output_by_scheme() {
    let console = OutputWrapper::from_url(&Url::parse("console://").unwrap());
    assert!(matches!(console, Ok(OutputWrapper::Console(_))));

    let unknown = OutputWrapper::from_url(&Url::parse("rtsp://camera/live").unwrap());
    assert!(matches!(unknown, Err(OutputError::SchemeMismatch(s)) if s == "rtsp"));
  }

  #[cfg(feature = "json_record")]
  #[test]
  fn json_scheme_is_json_record() {
    let output = OutputWrapper::from_url(&Url::parse("json:///tmp/out.json").unwrap());
    assert!(matches!(output, Ok(OutputWrapper::JsonRecordOutput(_))));
  }
}
