// 该文件是 Kanjian （看见） 项目的一部分。
// src/output/view.rs - 由界面状态生成的视图内容
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

use crate::{input::ImageRef, screen::AppState};

const TAP_PROMPT: &str = "Tap to choose image";
const PREDICTIONS_HEADER: &str = "Predictions: ";
const DETECTING_PLACEHOLDER: &str = "Detecting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelIndicator {
  Loading,
  Ready,
}

/// 界面上显示的内容，不含样式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
  pub model_indicator: ModelIndicator,
  pub picker_enabled: bool,
  pub image: Option<ImageRef>,
  pub prompt: Option<&'static str>,
  pub predictions_header: Option<String>,
  pub labels: Vec<String>,
}

impl From<&AppState> for ScreenView {
  fn from(state: &AppState) -> Self {
    let model_ready = state.is_model_ready();
    let image = state.selected_image().cloned();

    let predictions_header = (model_ready && image.is_some()).then(|| match state.predictions() {
      Some(_) => PREDICTIONS_HEADER.to_string(),
      None => format!("{}{}", PREDICTIONS_HEADER, DETECTING_PLACEHOLDER),
    });

    let labels = match state.predictions() {
      Some(predictions) if model_ready => predictions.iter().map(|p| p.class.clone()).collect(),
      _ => Vec::new(),
    };

    Self {
      model_indicator: if model_ready {
        ModelIndicator::Ready
      } else {
        ModelIndicator::Loading
      },
      picker_enabled: model_ready,
      prompt: (model_ready && image.is_none()).then_some(TAP_PROMPT),
      image,
      predictions_header,
      labels,
    }
  }
}

impl std::fmt::Display for ScreenView {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.model_indicator {
      ModelIndicator::Ready => writeln!(f, "Detection Ready? 🚀")?,
      ModelIndicator::Loading => writeln!(f, "Detection Ready? ...")?,
    }
    if let Some(image) = &self.image {
      writeln!(f, "[{}]", image)?;
    }
    if let Some(prompt) = self.prompt {
      writeln!(f, "{}", prompt)?;
    }
    if let Some(header) = &self.predictions_header {
      writeln!(f, "{}", header)?;
    }
    for label in &self.labels {
      writeln!(f, "  {}", label)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{model::Prediction, readiness::Prerequisite};

  #[test]
  fn loading_screen_has_no_prompt() {
    let view = ScreenView::from(&AppState::default());
    assert_eq!(view.model_indicator, ModelIndicator::Loading);
    assert!(!view.picker_enabled);
    assert_eq!(view.prompt, None);
    assert_eq!(view.predictions_header, None);
  }

  #[test]
  fn ready_screen_prompts_for_image() {
    let mut state = AppState::default();
    state.readiness.mark(Prerequisite::Model);

    let view = ScreenView::from(&state);
    assert_eq!(view.model_indicator, ModelIndicator::Ready);
    assert!(view.picker_enabled);
    assert_eq!(view.prompt, Some(TAP_PROMPT));
  }

  #[test]
  fn renders_one_label_per_prediction() {
    let mut state = AppState::default();
    state.readiness.mark(Prerequisite::Model);
    state.selected_image = Some(ImageRef::new("cat.jpg"));
    state.predictions = Some(vec![
      Prediction::new("cat", 0.8, [0.0, 0.0, 5.0, 5.0]),
      Prediction::new("cat", 0.6, [5.0, 5.0, 5.0, 5.0]),
    ]);

    let view = ScreenView::from(&state);
    assert_eq!(view.prompt, None);
    assert_eq!(view.predictions_header.as_deref(), Some("Predictions: "));
    assert_eq!(view.labels, vec!["cat", "cat"]);

    let text = view.to_string();
    assert!(text.contains("[cat.jpg]"));
    assert_eq!(text.matches("  cat").count(), 2);
  }
}
