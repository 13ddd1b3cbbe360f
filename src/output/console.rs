// 该文件是 Kanjian （看见） 项目的一部分。
// src/output/console.rs - 终端输出
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

use std::convert::Infallible;

use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  input::ImageRef,
  model::Prediction,
  output::Render,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl FromUrlWithScheme for ConsoleOutput {
  const SCHEME: &'static str = "console";
}

impl FromUrl for ConsoleOutput {
  type Error = Infallible;

  fn from_url(_url: &Url) -> Result<Self, Self::Error> {
    Ok(ConsoleOutput)
  }
}

pub(crate) fn format_prediction(prediction: &Prediction) -> String {
  format!(
    "{}: {:.2}% at ({:.0}, {:.0}, {:.0}x{:.0})",
    prediction.class,
    prediction.score * 100.0,
    prediction.bbox[0],
    prediction.bbox[1],
    prediction.bbox[2],
    prediction.bbox[3]
  )
}

impl Render for ConsoleOutput {
  type Error = Infallible;

  fn render_result(&self, image: &ImageRef, predictions: &[Prediction]) -> Result<(), Self::Error> {
    println!("{}: 检测到 {} 个对象", image, predictions.len());
    for prediction in predictions {
      println!("  - {}", format_prediction(prediction));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_score_and_box() {
    let prediction = Prediction::new("apple", 0.9, [1.0, 2.0, 30.0, 40.0]);
    assert_eq!(
      format_prediction(&prediction),
      "apple: 90.00% at (1, 2, 30x40)"
    );
  }
}
