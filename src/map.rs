//! Map Module
//!
//! 検証済みのマーカーレコード列から、単体で閲覧可能なインタラクティブ
//! マップドキュメント（Leafletベースの単一HTMLファイル）を構築するモジュール。

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::api::TileProvider;
use crate::error::MineralMapError;
use crate::validator::MapRequest;

/// 出力ファイルの固定名
///
/// マップは常にこの名前で出力フォルダ内に書き込まれ、既存のファイルは
/// 黙って上書きされます。
pub const MAP_FILE_NAME: &str = "mineral_collection_map.html";

/// マップの中心座標（固定）
const MAP_CENTER: (f64, f64) = (0.0, 0.0);

/// Leaflet CDNのバージョン
const LEAFLET_VERSION: &str = "1.9.4";

/// マップドキュメント
///
/// 検証済みの`MapRequest`を、ブラウザでそのまま開けるHTMLドキュメントに
/// レンダリングします。マップは(0, 0)を中心に、リクエストのズームレベルで
/// 初期化され、各マーカーにはラベルと説明のポップアップが結び付けられます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::{MapDocument, MapRequest, TileProvider};
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// # let request = MapRequest { markers: vec![], zoom: 6 };
/// let document = MapDocument::new(&request, &TileProvider::OpenStreetMap);
/// let path = document.save("/tmp/maps")?;
/// println!("Map written to {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MapDocument<'a> {
    /// レンダリング対象のリクエスト
    request: &'a MapRequest,

    /// 背景タイルの提供元
    tiles: &'a TileProvider,
}

/// マップドキュメントに埋め込むマーカーのJSON表現
#[derive(Serialize)]
struct MarkerJson {
    lat: f64,
    lon: f64,
    popup: String,
}

impl<'a> MapDocument<'a> {
    /// 新しいマップドキュメントを作成
    pub fn new(request: &'a MapRequest, tiles: &'a TileProvider) -> Self {
        Self { request, tiles }
    }

    /// マップドキュメントをライターに出力する
    ///
    /// マーカーデータはJSON配列としてページに埋め込まれます。
    ///
    /// # 引数
    ///
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(MineralMapError::Io)` - 書き込みに失敗した場合
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<(), MineralMapError> {
        let markers: Vec<MarkerJson> = self
            .request
            .markers
            .iter()
            .map(|marker| MarkerJson {
                lat: marker.lat,
                lon: marker.lon,
                popup: marker.popup_html(),
            })
            .collect();

        let marker_json = serde_json::to_string(&markers)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        // `</script>`でスクリプト要素が閉じられないようにする
        // （セル由来のテキストはpopup_html側でHTMLエスケープ済み）
        let marker_json = marker_json.replace("</", "<\\/");

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(
            writer,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(writer, "<title>Mineral Collection Map</title>")?;
        writeln!(
            writer,
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{}/dist/leaflet.css\">",
            LEAFLET_VERSION
        )?;
        writeln!(
            writer,
            "<script src=\"https://unpkg.com/leaflet@{}/dist/leaflet.js\"></script>",
            LEAFLET_VERSION
        )?;
        writeln!(
            writer,
            "<style>html, body, #map {{ height: 100%; margin: 0; }}</style>"
        )?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "<div id=\"map\"></div>")?;
        writeln!(writer, "<script>")?;
        writeln!(
            writer,
            "var map = L.map('map').setView([{}, {}], {});",
            MAP_CENTER.0, MAP_CENTER.1, self.request.zoom
        )?;
        // 帰属表示もマーカーと同じJSON経由で埋め込む（引用符や
        // バックスラッシュを含んでもスクリプトが壊れないようにする）
        let attribution_json = serde_json::to_string(self.tiles.attribution())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
            .replace("</", "<\\/");
        writeln!(
            writer,
            "L.tileLayer('{}', {{ attribution: {} }}).addTo(map);",
            self.tiles.url_template(),
            attribution_json
        )?;
        writeln!(writer, "var markers = {};", marker_json)?;
        writeln!(writer, "markers.forEach(function (m) {{")?;
        writeln!(
            writer,
            "  L.marker([m.lat, m.lon]).addTo(map).bindPopup(m.popup);"
        )?;
        writeln!(writer, "}});")?;
        writeln!(writer, "</script>")?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;

        writer.flush()?;
        Ok(())
    }

    /// マップドキュメントを文字列としてレンダリングする
    pub fn render_to_string(&self) -> Result<String, MineralMapError> {
        let mut buffer = Vec::new();
        self.render(&mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }

    /// マップドキュメントを出力フォルダに保存する
    ///
    /// ファイル名は常に`mineral_collection_map.html`で、既存のファイルは
    /// 黙って上書きされます。
    ///
    /// # 引数
    ///
    /// * `folder` - 出力フォルダのパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き込まれたファイルのパス
    /// * `Err(MineralMapError::Io)` - フォルダが存在しない、権限がないなど、
    ///   書き込みに失敗した場合
    pub fn save<P: AsRef<Path>>(&self, folder: P) -> Result<PathBuf, MineralMapError> {
        let output_path = folder.as_ref().join(MAP_FILE_NAME);
        let file = std::fs::File::create(&output_path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.render(&mut writer)?;
        writer.flush()?;
        Ok(output_path)
    }
}
