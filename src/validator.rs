//! Validator Module
//!
//! 行からマーカーへの変換・検証パイプライン。読み込まれたテーブルと
//! ユーザーの列・ズーム選択を、完全なマーカーレコード列か、原因を特定できる
//! 単一の失敗のどちらかに変換する。副作用はなく、ファイルシステムにも
//! UIにも触れない。

use crate::error::MineralMapError;
use crate::session::MapSession;
use crate::table::SpecimenTable;
use crate::types::{parse_coordinate, ColumnSelection, MarkerRecord};

/// 検証済みのマップ生成リクエスト
///
/// バリデーターの成功出力です。マーカーレコードの順序付き列と、
/// 整数として検証済みのズームレベルを保持し、そのままレンダラーに
/// 渡せる状態になっています。
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    /// マーカーレコード（テーブルの行順）
    pub markers: Vec<MarkerRecord>,

    /// 検証済みのズームレベル
    ///
    /// 有効範囲は1〜18とされていますが、範囲の強制は行いません。
    pub zoom: i64,
}

/// セッションの内容を検証し、マーカーレコード列を構築する
///
/// # 前提条件（この順に検査され、それぞれ異なるエラーになる）
///
/// 1. テーブルが読み込まれていること — `NoDataLoaded`
/// 2. 座標列と名前列が選択されていること（説明列は任意）— `MissingColumnSelection`
/// 3. 選択されたすべての列名がテーブルに存在すること — `ColumnNotFound`
/// 4. ズームレベルが整数として解析できること — `InvalidZoomLevel`
/// 5. 出力フォルダが設定されていること — `NoOutputFolder`
///
/// # 行処理
///
/// テーブルの全行を行順に走査します。各行の座標セルをテキストとして読み、
/// カンマで2つに分割して緯度・経度を解析します。1行でも解析に失敗すると、
/// その時点で処理全体が`InvalidCoordinate`（問題のセルの生の値を含む）で
/// 中断されます。部分的な結果は破棄されます。行をスキップして続行する
/// 設計ではありません。
///
/// # 引数
///
/// * `session` - 現在のセッション状態
///
/// # 戻り値
///
/// * `Ok(MapRequest)` - 全行の検証に成功した場合
/// * `Err(MineralMapError)` - いずれかの前提条件または行が失敗した場合
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::{build_markers, MapSession};
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// let mut session = MapSession::new();
/// session.load_file("specimens.xlsx")?;
/// session.set_coordinate_column(Some("Coords".to_string()));
/// session.set_name_column(Some("Name".to_string()));
/// session.set_output_folder(Some("/tmp/maps".into()));
///
/// let request = build_markers(&session)?;
/// println!("{} markers at zoom {}", request.markers.len(), request.zoom);
/// # Ok(())
/// # }
/// ```
pub fn build_markers(session: &MapSession) -> Result<MapRequest, MineralMapError> {
    // 1. テーブルが読み込まれていること
    let table = session.table().ok_or(MineralMapError::NoDataLoaded)?;

    let selection = session.selection();

    // 2. 必須列（座標・名前）が選択されていること
    let coord_col = selection
        .coordinate
        .as_deref()
        .ok_or(MineralMapError::MissingColumnSelection)?;
    let name_col = selection
        .name
        .as_deref()
        .ok_or(MineralMapError::MissingColumnSelection)?;

    // 3. 選択されたすべての列がテーブルに存在すること
    let (coord_idx, name_idx, desc_idx) = resolve_columns(table, selection, coord_col, name_col)?;

    // 4. ズームレベルが整数であること
    let zoom: i64 = session.zoom_text().trim().parse()?;

    // 5. 出力フォルダが設定されていること
    if session.output_folder().is_none() {
        return Err(MineralMapError::NoOutputFolder);
    }

    // 行処理: 全行をテーブル順に走査し、最初の不正座標で全体を中断する
    let mut markers = Vec::with_capacity(table.row_count());
    for row in table.rows() {
        let raw_coord = row
            .get(coord_idx)
            .map(|cell| cell.as_display_string())
            .unwrap_or_default();

        let (lat, lon) = parse_coordinate(&raw_coord)
            .ok_or_else(|| MineralMapError::InvalidCoordinate(raw_coord.clone()))?;

        let label = row
            .get(name_idx)
            .map(|cell| cell.as_display_string())
            .unwrap_or_default();

        let description = desc_idx
            .and_then(|idx| row.get(idx))
            .map(|cell| cell.as_display_string())
            .unwrap_or_default();

        markers.push(MarkerRecord {
            lat,
            lon,
            label,
            description,
        });
    }

    Ok(MapRequest { markers, zoom })
}

/// 選択された列名を列インデックスに解決する
///
/// 選択済みで存在しない列があれば、行を1つも読む前に
/// `ColumnNotFound`で失敗します。
fn resolve_columns(
    table: &SpecimenTable,
    selection: &ColumnSelection,
    coord_col: &str,
    name_col: &str,
) -> Result<(usize, usize, Option<usize>), MineralMapError> {
    let coord_idx = table
        .column_index(coord_col)
        .ok_or_else(|| MineralMapError::ColumnNotFound(coord_col.to_string()))?;
    let name_idx = table
        .column_index(name_col)
        .ok_or_else(|| MineralMapError::ColumnNotFound(name_col.to_string()))?;

    let desc_idx = match selection.description.as_deref() {
        Some(desc_col) => Some(
            table
                .column_index(desc_col)
                .ok_or_else(|| MineralMapError::ColumnNotFound(desc_col.to_string()))?,
        ),
        None => None,
    };

    Ok((coord_idx, name_idx, desc_idx))
}
