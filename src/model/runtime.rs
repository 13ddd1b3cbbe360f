// 该文件是 Kanjian （看见） 项目的一部分。
// src/model/runtime.rs - 推理运行时就绪信号
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

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::Runtime;

/// CPU 运行时无需初始化
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateRuntime;

#[async_trait]
impl Runtime for ImmediateRuntime {
  async fn ready(&self) {
    debug!("运行时就绪");
  }
}

/// 延迟一段时间后就绪，用于模拟较慢的运行时初始化
#[derive(Debug, Clone, Copy)]
pub struct DelayedRuntime {
  delay: Duration,
}

impl DelayedRuntime {
  pub fn new(delay: Duration) -> Self {
    Self { delay }
  }
}

#[async_trait]
impl Runtime for DelayedRuntime {
  async fn ready(&self) {
    tokio::time::sleep(self.delay).await;
    debug!("运行时就绪，耗时: {:.2?}", self.delay);
  }
}
