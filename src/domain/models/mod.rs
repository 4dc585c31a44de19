// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 循环规则（recurrence）：周期模板的重复调度规则
/// - 模板（template）：可复用的周期性工作清单定义
/// - 分配（assignment）：客户对模板的订阅及其调度边界
/// - 运营周期（cycle）：某一时间区间内物化生成的工作清单
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod assignment;
pub mod cycle;
pub mod recurrence;
pub mod template;
