// 该文件是 Kanjian （看见） 项目的一部分。
// src/model/replay.rs - 回放模型：从 JSON 文件读取检测结果
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
use tracing::{debug, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::{AsHwcFrame, RgbHwcFrame},
  model::{Detector, ModelError, ModelLoader, Prediction},
};

/// 对任意有效输入都返回同一组预测的模型
#[derive(Debug, Clone)]
pub struct ReplayModel {
  predictions: Box<[Prediction]>,
  min_score: f32,
}

impl ReplayModel {
  pub fn new(predictions: Vec<Prediction>) -> Self {
    Self {
      predictions: predictions.into_boxed_slice(),
      min_score: 0.0,
    }
  }

  pub fn with_min_score(mut self, min_score: f32) -> Self {
    self.min_score = min_score;
    self
  }
}

#[async_trait]
impl Detector for ReplayModel {
  async fn detect(&self, frame: &RgbHwcFrame) -> Result<Vec<Prediction>, ModelError> {
    if frame.is_empty() {
      return Err(ModelError::InvalidInput(frame.shape()));
    }

    let items: Vec<Prediction> = self
      .predictions
      .iter()
      .filter(|p| p.score >= self.min_score)
      .cloned()
      .collect();
    debug!("检测到 {} 个物体", items.len());
    Ok(items)
  }
}

#[derive(Debug, Clone)]
pub struct ReplayModelLoader {
  model_path: String,
  min_score: f32,
}

impl FromUrlWithScheme for ReplayModelLoader {
  const SCHEME: &'static str = "replay";
}

impl FromUrl for ReplayModelLoader {
  type Error = ModelError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ModelError::ModelPathError(format!(
        "模型路径必须使用 {} 方案",
        Self::SCHEME
      )));
    }

    let model_path = urlencoding::decode(url.path())
      .map_err(|e| ModelError::ModelPathError(e.to_string()))?
      .into_owned();

    let min_score = match url.query_pairs().find(|(k, _)| k == "min_score") {
      Some((_, v)) => v
        .parse::<f32>()
        .map_err(|e| ModelError::ModelPathError(format!("min_score 无效: {}", e)))?,
      None => 0.0,
    };

    Ok(ReplayModelLoader {
      model_path,
      min_score,
    })
  }
}

#[async_trait]
impl ModelLoader for ReplayModelLoader {
  async fn load(&self) -> Result<Arc<dyn Detector>, ModelError> {
    info!("加载模型文件: {}", self.model_path);
    let data = tokio::fs::read(&self.model_path).await?;
    let predictions: Vec<Prediction> = serde_json::from_slice(&data)?;
    info!("模型加载完成，共 {} 条预测", predictions.len());

    Ok(Arc::new(
      ReplayModel::new(predictions).with_min_score(self.min_score),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frame() -> RgbHwcFrame {
    RgbHwcFrame::with_data(1, 1, vec![1, 2, 3]).unwrap()
  }

  #[tokio::test]
  async fn replays_predictions_above_min_score() {
    let model = ReplayModel::new(vec![
      Prediction::new("apple", 0.9, [0.0, 0.0, 1.0, 1.0]),
      Prediction::new("pear", 0.2, [1.0, 1.0, 2.0, 2.0]),
    ])
    .with_min_score(0.5);

    let items = model.detect(&frame()).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].class, "apple");
  }

  #[tokio::test]
  async fn rejects_empty_frame() {
    let model = ReplayModel::new(Vec::new());
    let empty = RgbHwcFrame::with_data(0, 0, Vec::new()).unwrap();
    assert!(matches!(
      model.detect(&empty).await,
      Err(ModelError::InvalidInput([0, 0, 3]))
    ));
  }

  #[test]
  fn loader_from_url() {
    let url = Url::parse("replay:///models/coco%20ssd.json?min_score=0.25").unwrap();
    let loader = ReplayModelLoader::from_url(&url).unwrap();
    assert_eq!(loader.model_path, "/models/coco ssd.json");
    assert_eq!(loader.min_score, 0.25);

    let url = Url::parse("yolo26:///models/a.rknn").unwrap();
    assert!(ReplayModelLoader::from_url(&url).is_err());
  }

  #[tokio::test]
  async fn loads_predictions_from_json() {
    let path = std::env::temp_dir().join("kanjian-replay-model.json");
    std::fs::write(
      &path,
      r#"[{"class":"dog","score":0.75,"bbox":[10.0,20.0,30.0,40.0]}]"#,
    )
    .unwrap();
    let url = Url::from_file_path(&path).unwrap();
    let url = Url::parse(&format!("replay://{}", url.path())).unwrap();

    let model = ReplayModelLoader::from_url(&url)
      .unwrap()
      .load()
      .await
      .unwrap();
    let items = model.detect(&frame()).await.unwrap();

    assert_eq!(
      items,
      vec![Prediction::new("dog", 0.75, [10.0, 20.0, 30.0, 40.0])]
    );
    let _ = std::fs::remove_file(path);
  }

  #[tokio::test]
  async fn malformed_json_is_invalid_model() {
    let path = std::env::temp_dir().join("kanjian-replay-broken.json");
    std::fs::write(&path, "{not json").unwrap();
    let loader = ReplayModelLoader {
      model_path: path.to_string_lossy().into_owned(),
      min_score: 0.0,
    };

    assert!(matches!(
      loader.load().await,
      Err(ModelError::ModelInvalid(_))
    ));
    let _ = std::fs::remove_file(path);
  }
}
