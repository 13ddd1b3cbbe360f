// 该文件是 Kanjian （看见） 项目的一部分。
// src/screen/state.rs - 检测界面状态
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

use crate::{
  input::ImageRef,
  model::{Detector, Prediction},
  permission::PermissionStatus,
  readiness::Readiness,
};

/// 界面状态，只由 [`super::Screen`] 以整字段替换的方式修改
#[derive(Default)]
pub struct AppState {
  pub(crate) readiness: Readiness,
  pub(crate) model: Option<Arc<dyn Detector>>,
  pub(crate) selected_image: Option<ImageRef>,
  pub(crate) predictions: Option<Vec<Prediction>>,
  pub(crate) permission: Option<PermissionStatus>,
}

impl AppState {
  pub fn is_runtime_ready(&self) -> bool {
    self.readiness.is_runtime_ready()
  }

  pub fn is_model_ready(&self) -> bool {
    self.readiness.is_model_ready()
  }

  pub fn is_fully_ready(&self) -> bool {
    self.readiness.is_fully_ready()
  }

  pub fn selected_image(&self) -> Option<&ImageRef> {
    self.selected_image.as_ref()
  }

  pub fn predictions(&self) -> Option<&[Prediction]> {
    self.predictions.as_deref()
  }

  pub fn permission(&self) -> Option<PermissionStatus> {
    self.permission
  }
}

impl std::fmt::Debug for AppState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppState")
      .field("readiness", &self.readiness)
      .field("model", &self.model.as_ref().map(|_| "<detector>"))
      .field("selected_image", &self.selected_image)
      .field("predictions", &self.predictions)
      .field("permission", &self.permission)
      .finish()
  }
}
