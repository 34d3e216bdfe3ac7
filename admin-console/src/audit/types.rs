//! 監査ログの型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// イベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// テナント更新状況の参照
    ShowTenantUpdate,
    /// テナント更新の開始
    StartTenantUpdate,
    /// テナント更新の停止
    StopTenantUpdate,
}

impl EventType {
    /// 文字列からEventTypeに変換（未知の値はNone）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "show_tenant_update" => Some(Self::ShowTenantUpdate),
            "start_tenant_update" => Some(Self::StartTenantUpdate),
            "stop_tenant_update" => Some(Self::StopTenantUpdate),
            _ => None,
        }
    }

    /// EventTypeを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowTenantUpdate => "show_tenant_update",
            Self::StartTenantUpdate => "start_tenant_update",
            Self::StopTenantUpdate => "stop_tenant_update",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// イベントパラメータ（キー順に整列したマップ）
pub type EventParams = BTreeMap<String, String>;

/// 監査ログエントリ
///
/// 作成後は変更されない。IDは生成時に採番するため、
/// 同一入力の呼び出しでも別レコードになる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// レコードID
    pub id: Uuid,
    /// イベント種別
    pub event_type: EventType,
    /// 呼び出し元のアイデンティティID
    pub identity_id: Uuid,
    /// 操作パラメータ
    pub event_params: EventParams,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// 新しいエントリを生成
    pub fn new(event_type: EventType, identity_id: Uuid, event_params: EventParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            identity_id,
            event_params,
            created_at: Utc::now(),
        }
    }
}

/// 監査ログフィルタ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogFilter {
    /// アイデンティティIDでフィルタ
    pub identity_id: Option<Uuid>,
    /// イベント種別でフィルタ
    pub event_type: Option<EventType>,
    /// 開始日時
    pub time_from: Option<DateTime<Utc>>,
    /// 終了日時
    pub time_to: Option<DateTime<Utc>>,
    /// ページ番号（1始まり）
    pub page: Option<i64>,
    /// ページあたり件数
    pub per_page: Option<i64>,
}
