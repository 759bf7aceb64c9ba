//! Builder Module
//!
//! Fluent Builder APIを提供し、`MapGenerator`インスタンスを段階的に構築する。

use std::path::PathBuf;

use crate::api::TileProvider;
use crate::error::MineralMapError;
use crate::map::MapDocument;
use crate::session::MapSession;
use crate::validator::build_markers;

/// マップ生成の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct GeneratorConfig {
    /// 背景タイルの提供元
    pub tiles: TileProvider,
}

/// Fluent Builder APIを提供する構造体
///
/// `MapGenerator`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::{MapGeneratorBuilder, TileProvider};
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// let generator = MapGeneratorBuilder::new()
///     .with_tile_provider(TileProvider::OpenStreetMap)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MapGeneratorBuilder {
    /// 内部設定（構築中）
    config: GeneratorConfig,
}

impl MapGeneratorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - タイル提供元: OpenStreetMap
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// 背景タイルの提供元を指定する
    ///
    /// # 引数
    ///
    /// * `tiles: TileProvider`: タイル提供元
    pub fn with_tile_provider(mut self, tiles: TileProvider) -> Self {
        self.config.tiles = tiles;
        self
    }

    /// 設定を検証し、`MapGenerator`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(MapGenerator)` - 設定が有効な場合
    /// * `Err(MineralMapError::Config)` - 設定が無効な場合（例: カスタム
    ///   タイルURLにプレースホルダーが欠けている）
    pub fn build(self) -> Result<MapGenerator, MineralMapError> {
        // カスタムタイルURLの検証
        if let TileProvider::Custom { url_template, .. } = &self.config.tiles {
            for placeholder in ["{z}", "{x}", "{y}"] {
                if !url_template.contains(placeholder) {
                    return Err(MineralMapError::Config(format!(
                        "Tile URL template is missing the {} placeholder: '{}'",
                        placeholder, url_template
                    )));
                }
            }
        }

        Ok(MapGenerator::new(self.config))
    }
}

/// マップ生成処理のファサード
///
/// セッションの内容を検証し、マーカーレコードを構築し、マップドキュメントを
/// 出力フォルダに書き込むまでの一連の処理を実行するメインエントリーポイント
/// です。処理はすべて同期的に、呼び出しスレッド上で実行されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::{MapGeneratorBuilder, MapSession};
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// let mut session = MapSession::new();
/// session.load_file("specimens.xlsx")?;
/// session.set_coordinate_column(Some("Coords".to_string()));
/// session.set_name_column(Some("Name".to_string()));
/// session.set_output_folder(Some("/tmp/maps".into()));
///
/// let generator = MapGeneratorBuilder::new().build()?;
/// let path = generator.generate(&session)?;
/// println!("Interactive map created successfully at {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MapGenerator {
    /// 生成設定
    config: GeneratorConfig,
}

impl MapGenerator {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// セッションの内容からマップを生成し、出力フォルダに書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. セッションの検証とマーカーレコードの構築（`build_markers`）
    /// 2. マップドキュメントのレンダリング
    /// 3. 出力フォルダへの書き込み（固定ファイル名、黙って上書き）
    ///
    /// いずれかの段階で失敗すると、その時点でエラーが返ります。検証に
    /// 失敗した場合、出力ファイルには一切触れません。
    ///
    /// # 引数
    ///
    /// * `session` - 現在のセッション状態
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き込まれたマップファイルのパス
    /// * `Err(MineralMapError)` - 検証または書き込みに失敗した場合
    pub fn generate(&self, session: &MapSession) -> Result<PathBuf, MineralMapError> {
        let request = build_markers(session)?;

        // 出力フォルダの存在はbuild_markers内で検証済み
        let folder = session
            .output_folder()
            .ok_or(MineralMapError::NoOutputFolder)?;

        let document = MapDocument::new(&request, &self.config.tiles);
        document.save(folder)
    }

    /// セッションの内容からマップを生成し、文字列として返す
    ///
    /// ファイルシステムには書き込みません。検証は`generate`と同一で、
    /// 出力フォルダの設定も要求されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - レンダリングされたHTMLドキュメント
    /// * `Err(MineralMapError)` - 検証に失敗した場合
    pub fn generate_to_string(&self, session: &MapSession) -> Result<String, MineralMapError> {
        let request = build_markers(session)?;
        let document = MapDocument::new(&request, &self.config.tiles);
        document.render_to_string()
    }
}
