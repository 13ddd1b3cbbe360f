// 该文件是 Kanjian （看见） 项目的一部分。
// src/screen.rs - 检测界面控制器
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

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::{
  input::{Fetch, ImagePicker, ImageRef, PickResult, PickerOptions, PixelDecoder},
  model::{Detector, ModelError, ModelLoader, Prediction, Runtime},
  permission::{PermissionError, PermissionGate, PermissionKind, PermissionStatus},
  readiness::Prerequisite,
};

mod pipeline;
pub use self::pipeline::{DetectionError, detect_objects};

mod state;
pub use self::state::AppState;

/// 新选择的图片与尚未完成的旧检测之间如何取舍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StalePolicy {
  /// 只接受当前选择的检测结果，过期结果被丢弃
  #[default]
  LatestSelection,
  /// 最后完成的检测结果生效
  LastFinished,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenConfig {
  pub picker: PickerOptions,
  pub stale_policy: StalePolicy,
}

/// 界面依赖的外部能力
#[derive(Clone)]
pub struct Capabilities {
  pub runtime: Arc<dyn Runtime>,
  pub loader: Arc<dyn ModelLoader>,
  pub permission: Arc<dyn PermissionGate>,
  pub picker: Arc<dyn ImagePicker>,
  pub fetch: Arc<dyn Fetch>,
}

/// 后台任务完成后回报给控制器的事件
pub enum ScreenEvent {
  RuntimeReady,
  ModelLoaded(Arc<dyn Detector>),
  ModelLoadFailed(ModelError),
  PermissionAnswered(Result<PermissionStatus, PermissionError>),
  DetectionFinished {
    generation: u64,
    image: ImageRef,
    result: Result<Vec<Prediction>, DetectionError>,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
  /// 模型未就绪，选图入口不可用
  Disabled,
  Cancelled,
  Selected(u64),
  Failed,
}

pub struct Screen {
  caps: Capabilities,
  decoder: PixelDecoder,
  config: ScreenConfig,
  state: AppState,
  mounted: bool,
  permission_requested: bool,
  generation: u64,
  applied_generation: Option<u64>,
  tasks: JoinSet<ScreenEvent>,
}

impl Screen {
  pub fn new(caps: Capabilities, config: ScreenConfig) -> Self {
    Self {
      caps,
      decoder: PixelDecoder,
      config,
      state: AppState::default(),
      mounted: false,
      permission_requested: false,
      generation: 0,
      applied_generation: None,
      tasks: JoinSet::new(),
    }
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  /// 没有尚未回报的后台任务
  pub fn is_idle(&self) -> bool {
    self.tasks.is_empty()
  }

  /// 最近一次写入界面的检测结果所属的选择序号
  pub fn applied_generation(&self) -> Option<u64> {
    self.applied_generation
  }

  /// 同时启动运行时与模型的初始化，需要在 tokio 运行时内调用
  pub fn mount(&mut self) {
    if self.mounted {
      warn!("界面已挂载，忽略重复挂载");
      return;
    }
    self.mounted = true;
    info!("开始初始化运行时与模型...");

    let runtime = self.caps.runtime.clone();
    self.tasks.spawn(async move {
      runtime.ready().await;
      ScreenEvent::RuntimeReady
    });

    let loader = self.caps.loader.clone();
    self.tasks.spawn(async move {
      match loader.load().await {
        Ok(model) => ScreenEvent::ModelLoaded(model),
        Err(e) => ScreenEvent::ModelLoadFailed(e),
      }
    });
  }

  /// 等待下一个后台事件；没有后台任务时返回 None
  pub async fn next_event(&mut self) -> Option<ScreenEvent> {
    while let Some(joined) = self.tasks.join_next().await {
      match joined {
        Ok(event) => return Some(event),
        Err(e) => error!("后台任务异常退出: {}", e),
      }
    }
    None
  }

  pub async fn handle_event(&mut self, event: ScreenEvent) {
    match event {
      ScreenEvent::RuntimeReady => {
        if self.state.readiness.mark(Prerequisite::Runtime) {
          info!("运行时就绪");
        }
      }
      ScreenEvent::ModelLoaded(model) => {
        self.state.model = Some(model);
        if self.state.readiness.mark(Prerequisite::Model) {
          info!("模型就绪");
          self.request_permission();
        }
      }
      ScreenEvent::ModelLoadFailed(e) => {
        error!("模型加载失败: {}", e);
      }
      ScreenEvent::PermissionAnswered(answer) => match answer {
        Ok(status) => {
          if status.is_granted() {
            info!("媒体库权限已授予");
          } else {
            warn!("需要媒体库权限，当前状态: {:?}", status);
          }
          self.state.permission = Some(status);
        }
        Err(e) => {
          warn!("请求媒体库权限失败: {}", e);
        }
      },
      ScreenEvent::DetectionFinished {
        generation,
        image,
        result,
      } => match result {
        Ok(predictions) => {
          if self.config.stale_policy == StalePolicy::LatestSelection
            && generation != self.generation
          {
            debug!(
              "丢弃过期的检测结果: {} (第 {} 次选择，当前第 {} 次)",
              image, generation, self.generation
            );
            return;
          }
          info!("图片 {} 检测到 {} 个物体", image, predictions.len());
          self.state.predictions = Some(predictions);
          self.applied_generation = Some(generation);
        }
        Err(e) => {
          error!("图片 {} 检测失败: {}", image, e);
        }
      },
    }
  }

  /// 处理事件直到所有后台任务都已结束
  pub async fn settle(&mut self) {
    while let Some(event) = self.next_event().await {
      self.handle_event(event).await;
    }
  }

  /// 处理事件直到模型就绪，模型加载失败时返回 false
  pub async fn wait_until_model_ready(&mut self) -> bool {
    while !self.state.is_model_ready() {
      match self.next_event().await {
        Some(event) => self.handle_event(event).await,
        None => break,
      }
    }
    self.state.is_model_ready()
  }

  /// 点击选图区域
  pub async fn tap(&mut self) -> TapOutcome {
    if !self.state.is_model_ready() {
      debug!("模型尚未就绪，忽略点击");
      return TapOutcome::Disabled;
    }

    match self.caps.picker.launch(&self.config.picker).await {
      Ok(PickResult::Cancelled) => {
        debug!("选图已取消");
        TapOutcome::Cancelled
      }
      Ok(PickResult::Picked(image)) => match self.select_image(image) {
        Some(generation) => TapOutcome::Selected(generation),
        None => TapOutcome::Disabled,
      },
      Err(e) => {
        error!("选图失败: {}", e);
        TapOutcome::Failed
      }
    }
  }

  /// 设置选中的图片并启动一次检测，返回本次选择的序号
  pub fn select_image(&mut self, image: ImageRef) -> Option<u64> {
    if !self.state.is_model_ready() {
      debug!("模型尚未就绪，忽略选图: {}", image);
      return None;
    }
    let model = self.state.model.clone()?;

    self.generation += 1;
    let generation = self.generation;
    self.state.selected_image = Some(image.clone());
    info!("开始检测第 {} 次选择的图片: {}", generation, image);

    let fetch = self.caps.fetch.clone();
    let decoder = self.decoder;
    self.tasks.spawn(async move {
      let result = detect_objects(&image, fetch.as_ref(), &decoder, model.as_ref()).await;
      ScreenEvent::DetectionFinished {
        generation,
        image,
        result,
      }
    });

    Some(generation)
  }

  // 权限请求在后台进行，等待期间界面照常响应
  fn request_permission(&mut self) {
    if self.permission_requested {
      return;
    }
    self.permission_requested = true;

    let permission = self.caps.permission.clone();
    self.tasks.spawn(async move {
      ScreenEvent::PermissionAnswered(permission.ask(PermissionKind::MediaLibrary).await)
    });
  }
}
