// 该文件是 Kanjian （看见） 项目的一部分。
// src/bin/simple_oneshot.rs - 单张图片检测
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

use anyhow::Result;
use clap::Parser;
use url::Url;

use kanjian::{
  FromUrl,
  input::{FileFetch, FixedPicker, ImageRef},
  model::{ImmediateRuntime, ReplayModelLoader},
  output::{OutputWrapper, Render},
  permission::NoPermissionRequired,
  screen::{Capabilities, Screen, ScreenConfig, TapOutcome},
};
use tracing::info;

/// Kanjian 单张图片检测参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 回放模型地址
  #[arg(long, value_name = "MODEL")]
  pub model: Url,
  /// 输入图片路径或地址
  #[arg(long, value_name = "SOURCE")]
  pub input: String,
  /// 输出路径
  #[arg(long, value_name = "OUTPUT", default_value = "console://")]
  pub output: Url,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("模型地址: {}", args.model);
  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);

  let output = OutputWrapper::from_url(&args.output)?;
  let caps = Capabilities {
    runtime: Arc::new(ImmediateRuntime),
    loader: Arc::new(ReplayModelLoader::from_url(&args.model)?),
    permission: Arc::new(NoPermissionRequired),
    picker: Arc::new(FixedPicker::new([ImageRef::new(args.input)])),
    fetch: Arc::new(FileFetch),
  };

  let mut screen = Screen::new(caps, ScreenConfig::default());
  screen.mount();
  if !screen.wait_until_model_ready().await {
    anyhow::bail!("模型加载失败");
  }

  if screen.tap().await != TapOutcome::Selected(1) {
    anyhow::bail!("没有输入图片");
  }
  screen.settle().await;
  if screen.applied_generation() != Some(1) {
    anyhow::bail!("检测失败");
  }

  let state = screen.state();
  match (state.selected_image(), state.predictions()) {
    (Some(image), Some(predictions)) => output.render_result(image, predictions)?,
    _ => anyhow::bail!("检测失败"),
  }

  Ok(())
}
