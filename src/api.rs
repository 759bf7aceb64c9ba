//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// マップの背景タイルの提供元
///
/// 生成されたマップが使用するタイルレイヤーを指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TileProvider {
    /// OpenStreetMapの標準タイル（デフォルト）
    ///
    /// 帰属表示は自動的に付与されます。
    OpenStreetMap,

    /// カスタムタイルサーバー
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use mineralmap::TileProvider;
    ///
    /// let provider = TileProvider::Custom {
    ///     url_template: "https://tiles.example.com/{z}/{x}/{y}.png".to_string(),
    ///     attribution: "&copy; Example Tiles".to_string(),
    /// };
    /// ```
    Custom {
        /// タイルURLテンプレート（`{z}/{x}/{y}`プレースホルダーを含む）
        url_template: String,

        /// 帰属表示のHTML
        attribution: String,
    },
}

impl Default for TileProvider {
    fn default() -> Self {
        TileProvider::OpenStreetMap
    }
}

impl TileProvider {
    /// タイルURLテンプレートを取得
    pub(crate) fn url_template(&self) -> &str {
        match self {
            TileProvider::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileProvider::Custom { url_template, .. } => url_template,
        }
    }

    /// 帰属表示のHTMLを取得
    pub(crate) fn attribution(&self) -> &str {
        match self {
            TileProvider::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            TileProvider::Custom { attribution, .. } => attribution,
        }
    }
}
