// 该文件是 Kanjian （看见） 项目的一部分。
// src/main.rs - 交互式检测界面
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

mod args;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use kanjian::{
  FromUrl,
  input::{FileFetch, StdinPicker},
  model::{DelayedRuntime, ImmediateRuntime, ReplayModelLoader, Runtime},
  output::{OutputWrapper, Render, ScreenView},
  permission::{FixedPermission, NoPermissionRequired, PermissionGate},
  screen::{Capabilities, Screen, ScreenConfig, TapOutcome},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("模型地址: {}", args.model);
  info!("新旧结果取舍: {:?}", args.stale_policy);

  let loader = ReplayModelLoader::from_url(&args.model).context("无法创建模型")?;
  let permission: Arc<dyn PermissionGate> = match args.permission {
    Some(status) => Arc::new(FixedPermission(status)),
    None => Arc::new(NoPermissionRequired),
  };
  let runtime: Arc<dyn Runtime> = match args.runtime_delay_ms {
    0 => Arc::new(ImmediateRuntime),
    ms => Arc::new(DelayedRuntime::new(Duration::from_millis(ms))),
  };
  let output = args
    .output
    .as_ref()
    .map(OutputWrapper::from_url)
    .transpose()
    .context("无法创建输出")?;

  let caps = Capabilities {
    runtime,
    loader: Arc::new(loader),
    permission,
    picker: Arc::new(StdinPicker::stdin()),
    fetch: Arc::new(FileFetch),
  };
  let config = ScreenConfig {
    picker: args.picker_options(),
    stale_policy: args.stale_policy,
  };

  let mut screen = Screen::new(caps, config);
  screen.mount();
  print!("{}", ScreenView::from(screen.state()));

  if !screen.wait_until_model_ready().await {
    anyhow::bail!("模型加载失败");
  }

  loop {
    print!("{}", ScreenView::from(screen.state()));

    let generation = match screen.tap().await {
      TapOutcome::Selected(generation) => {
        screen.settle().await;
        print!("{}", ScreenView::from(screen.state()));
        generation
      }
      TapOutcome::Cancelled => continue,
      TapOutcome::Disabled | TapOutcome::Failed => break,
    };

    if screen.applied_generation() != Some(generation) {
      warn!("第 {} 次选择没有产生新的结果", generation);
      continue;
    }
    let state = screen.state();
    if let (Some(output), Some(image), Some(predictions)) =
      (&output, state.selected_image(), state.predictions())
    {
      output.render_result(image, predictions)?;
    }
  }

  info!("退出检测界面");
  Ok(())
}
