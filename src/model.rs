// 该文件是 Kanjian （看见） 项目的一部分。
// src/model.rs - 检测模型与运行时能力定义
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

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::RgbHwcFrame;

#[derive(Error, Debug)]
pub enum ModelError {
  #[error("模型加载错误: {0}")]
  ModelLoadError(#[from] std::io::Error),
  #[error("模型无效: {0}")]
  ModelInvalid(#[from] serde_json::Error),
  #[error("模型路径错误: {0}")]
  ModelPathError(String),
  #[error("输入张量形状无效: {0:?}")]
  InvalidInput([usize; 3]),
  #[error("推理失败: {0}")]
  InferenceError(String),
}

/// 单个检测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
  pub class: String,
  pub score: f32,
  pub bbox: [f32; 4], // [x, y, width, height]
}

impl Prediction {
  pub fn new(class: impl Into<String>, score: f32, bbox: [f32; 4]) -> Self {
    Self {
      class: class.into(),
      score,
      bbox,
    }
  }
}

/// 预训练检测模型
#[async_trait]
pub trait Detector: Send + Sync {
  async fn detect(&self, frame: &RgbHwcFrame) -> Result<Vec<Prediction>, ModelError>;
}

#[async_trait]
pub trait ModelLoader: Send + Sync {
  async fn load(&self) -> Result<Arc<dyn Detector>, ModelError>;
}

/// 推理运行时，就绪信号只触发一次且不携带数据
#[async_trait]
pub trait Runtime: Send + Sync {
  async fn ready(&self);
}

mod replay;
pub use self::replay::{ReplayModel, ReplayModelLoader};

mod runtime;
pub use self::runtime::{DelayedRuntime, ImmediateRuntime};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prediction_uses_class_on_the_wire() {
    let prediction = Prediction::new("apple", 0.9, [0.0, 0.0, 1.0, 1.0]);
    let json = serde_json::to_value(&prediction).unwrap();

    assert_eq!(json["class"], "apple");
    assert_eq!(json["bbox"].as_array().unwrap().len(), 4);

    let back: Prediction = serde_json::from_value(json).unwrap();
    assert_eq!(back, prediction);
  }
}
