// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 周期计算（period）：循环规则到具体日期区间的纯函数解析
/// - 周期物化服务（generate_cycle_service）：幂等地创建周期及任务清单
/// - 自动生成服务（auto_generate_service）：批量驱动所有适用分配的生成
pub mod auto_generate_service;
pub mod generate_cycle_service;
pub mod period;
