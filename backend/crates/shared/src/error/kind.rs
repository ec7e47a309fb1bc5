//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to process exit codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// 呼び出し元が取るべき対応に応じたエラー分類を定義します。
/// 各バリアントは BSD `sysexits.h` に準拠した終了コードにマッピングされます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.exit_code(), 66);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 64 - Usage: コマンドの使い方が不正
    Usage,
    /// 65 - Invalid Input: 入力データが不正
    InvalidInput,
    /// 66 - Not Found: 対象が見つからない
    NotFound,
    /// 69 - Unavailable: 外部サービス（リレー等）が利用不可
    Unavailable,
    /// 70 - Internal: 内部エラー
    Internal,
    /// 74 - I/O Error: 入出力エラー
    Io,
    /// 75 - Resource Exhausted: 試行回数などの上限に到達（再試行可能）
    ResourceExhausted,
    /// 78 - Config: 設定値が不正
    Config,
    /// 130 - Cancelled: 利用者による中断
    Cancelled,
}

impl ErrorKind {
    /// プロセス終了コードを取得
    ///
    /// ## Returns
    /// `sysexits.h` に準拠した終了コード（中断のみ シェル慣習の 130）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.exit_code(), 65);
    /// assert_eq!(ErrorKind::Cancelled.exit_code(), 130);
    /// ```
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Usage => 64,
            ErrorKind::InvalidInput => 65,
            ErrorKind::NotFound => 66,
            ErrorKind::Unavailable => 69,
            ErrorKind::Internal => 70,
            ErrorKind::Io => 74,
            ErrorKind::ResourceExhausted => 75,
            ErrorKind::Config => 78,
            ErrorKind::Cancelled => 130,
        }
    }

    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.as_str(), "Invalid Input");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Usage => "Usage",
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Internal => "Internal",
            ErrorKind::Io => "I/O Error",
            ErrorKind::ResourceExhausted => "Resource Exhausted",
            ErrorKind::Config => "Config",
            ErrorKind::Cancelled => "Cancelled",
        }
    }

    /// 内部側のエラーかどうかを判定
    ///
    /// 呼び出し元の入力に起因しないエラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::Internal | ErrorKind::Io)
    }

    /// 呼び出し元の入力に起因するエラーかどうかを判定
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Usage | ErrorKind::InvalidInput | ErrorKind::NotFound | ErrorKind::Config
        )
    }

    /// 同じ操作を再試行する価値があるか
    ///
    /// 上限到達（難易度を下げて再試行）と外部サービス不可が該当します。
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ResourceExhausted | ErrorKind::Unavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
