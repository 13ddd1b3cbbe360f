// 该文件是 Kanjian （看见） 项目的一部分。
// src/readiness.rs - 运行时与模型的就绪状态
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

/// 两项相互独立的异步初始化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
  Runtime,
  Model,
}

/// 两项初始化可按任意顺序完成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
  #[default]
  Initializing,
  PartiallyReady(Prerequisite),
  FullyReady,
}

impl Readiness {
  /// 标记一项初始化完成，返回该项是否是首次就绪
  pub fn mark(&mut self, done: Prerequisite) -> bool {
    if self.is_ready(done) {
      return false;
    }

    *self = match *self {
      Readiness::Initializing => Readiness::PartiallyReady(done),
      Readiness::PartiallyReady(_) => Readiness::FullyReady,
      Readiness::FullyReady => Readiness::FullyReady,
    };
    true
  }

  pub fn is_ready(&self, which: Prerequisite) -> bool {
    match self {
      Readiness::Initializing => false,
      Readiness::PartiallyReady(done) => *done == which,
      Readiness::FullyReady => true,
    }
  }

  pub fn is_runtime_ready(&self) -> bool {
    self.is_ready(Prerequisite::Runtime)
  }

  pub fn is_model_ready(&self) -> bool {
    self.is_ready(Prerequisite::Model)
  }

  pub fn is_fully_ready(&self) -> bool {
    *self == Readiness::FullyReady
  }
}
