// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台周期生成触发器
/// 按配置的间隔定期调用自动生成服务
pub mod cycle_worker;
