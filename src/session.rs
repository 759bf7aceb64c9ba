//! Session Module
//!
//! 1回の対話セッションの可変状態を保持する明示的なセッションオブジェクト。
//! フォーム（UIレイヤー）はこのオブジェクトを読み込み・選択イベントで更新し、
//! 生成時にバリデーターへ渡す。グローバル状態は存在しない。

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::MineralMapError;
use crate::table::{LoadLimits, SpecimenTable};
use crate::types::ColumnSelection;

/// デフォルトのズームレベル（テキスト表現）
pub const DEFAULT_ZOOM_TEXT: &str = "6";

/// マップ生成セッション
///
/// 現在読み込まれているテーブル、列選択、ズームレベル、出力フォルダを
/// 保持します。状態は実行をまたいで永続化されず、プログラム起動のたびに
/// 空のセッションから始まります。
///
/// # 不変条件
///
/// 新しいテーブルを読み込むと（成功・失敗を問わず）、3つの列選択は
/// すべて未設定に戻ります。読み込みに失敗した場合は以前のテーブルも
/// 破棄されるため、選択が別のファイルの列を指し続けることはありません。
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::MapSession;
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// let mut session = MapSession::new();
/// session.load_file("specimens.xlsx")?;
///
/// // フォームはこのリストからドロップダウンを構築する
/// let columns = session.column_names();
///
/// session.set_coordinate_column(Some("Coords".to_string()));
/// session.set_name_column(Some("Name".to_string()));
/// session.set_output_folder(Some("/tmp/maps".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MapSession {
    /// 現在読み込まれているテーブル（未読み込みの場合は`None`）
    table: Option<SpecimenTable>,

    /// 選択された入力ファイルのパス（表示用）
    input_path: Option<PathBuf>,

    /// 列選択の状態
    selection: ColumnSelection,

    /// ズームレベルの生のテキスト（検証は生成時に行う）
    zoom_text: String,

    /// 出力フォルダのパス
    output_folder: Option<PathBuf>,

    /// 読み込み時の制限
    limits: LoadLimits,
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSession {
    /// 空のセッションを作成
    ///
    /// ズームレベルはデフォルトの`"6"`に設定されます。
    pub fn new() -> Self {
        Self {
            table: None,
            input_path: None,
            selection: ColumnSelection::default(),
            zoom_text: DEFAULT_ZOOM_TEXT.to_string(),
            output_folder: None,
            limits: LoadLimits::default(),
        }
    }

    /// 読み込み時の制限を変更したセッションを作成
    pub fn with_limits(limits: LoadLimits) -> Self {
        Self {
            limits,
            ..Self::new()
        }
    }

    /// スプレッドシートファイルを読み込み、テーブルを置き換える
    ///
    /// 成功時は以前のテーブルが破棄され、3つの列選択がすべてリセット
    /// されます。失敗時も同様にテーブルと選択はクリアされます（古い列選択が
    /// 残らないようにするため）。
    ///
    /// # 引数
    ///
    /// * `path` - スプレッドシートファイルのパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 読み込みに成功した場合
    /// * `Err(MineralMapError)` - 読み込みに失敗した場合（テーブルはクリア済み）
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MineralMapError> {
        // 読み込み前に以前の状態を破棄する
        self.table = None;
        self.selection.clear();
        self.input_path = Some(path.as_ref().to_path_buf());

        let table = SpecimenTable::from_path(path, &self.limits)?;
        self.table = Some(table);
        Ok(())
    }

    /// リーダーからスプレッドシートを読み込み、テーブルを置き換える
    ///
    /// 挙動は`load_file`と同じです。入力パスの表示値は変更されません。
    pub fn load_reader<R: Read + Seek>(&mut self, reader: R) -> Result<(), MineralMapError> {
        self.table = None;
        self.selection.clear();

        let table = SpecimenTable::from_reader(reader, &self.limits)?;
        self.table = Some(table);
        Ok(())
    }

    /// 現在のテーブルを取得
    pub fn table(&self) -> Option<&SpecimenTable> {
        self.table.as_ref()
    }

    /// 現在のテーブルの列名リストを取得
    ///
    /// フォームはこのリストを列選択コントロールに描画します。リストは
    /// 単なるデータであり、UIツールキットへの依存はありません。
    /// テーブル未読み込みの場合は空のリストを返します。
    pub fn column_names(&self) -> Vec<String> {
        match &self.table {
            Some(table) => table.columns().to_vec(),
            None => Vec::new(),
        }
    }

    /// 選択された入力ファイルのパス（表示用）
    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    /// 現在の列選択を取得
    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    /// 座標列を選択
    ///
    /// 空文字列は未設定として扱われます。
    pub fn set_coordinate_column(&mut self, column: Option<String>) {
        self.selection.coordinate = normalize(column);
    }

    /// 名前列を選択
    pub fn set_name_column(&mut self, column: Option<String>) {
        self.selection.name = normalize(column);
    }

    /// 説明列を選択（任意）
    pub fn set_description_column(&mut self, column: Option<String>) {
        self.selection.description = normalize(column);
    }

    /// ズームレベルのテキストを取得
    pub fn zoom_text(&self) -> &str {
        &self.zoom_text
    }

    /// ズームレベルのテキストを設定
    ///
    /// この時点では検証されません。整数として解析できない値は
    /// 生成時に`MineralMapError::InvalidZoomLevel`になります。
    pub fn set_zoom_text<S: Into<String>>(&mut self, text: S) {
        self.zoom_text = text.into();
    }

    /// 出力フォルダを取得
    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    /// 出力フォルダを設定
    pub fn set_output_folder(&mut self, folder: Option<PathBuf>) {
        self.output_folder = folder;
    }
}

/// 空文字列の選択を未設定に正規化
fn normalize(column: Option<String>) -> Option<String> {
    column.filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Cursor;

    fn workbook_with_columns(names: &[&str]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, name) in names.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
        worksheet.write_string(1, 0, "1.0,2.0").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_new_session_is_blank() {
        let session = MapSession::new();
        assert!(session.table().is_none());
        assert!(session.column_names().is_empty());
        assert_eq!(session.zoom_text(), "6");
        assert!(session.output_folder().is_none());
        assert!(session.input_path().is_none());
    }

    #[test]
    fn test_load_reader_populates_columns() {
        let mut session = MapSession::new();
        session
            .load_reader(Cursor::new(workbook_with_columns(&["Coords", "Name"])))
            .unwrap();

        assert!(session.table().is_some());
        assert_eq!(session.column_names(), vec!["Coords", "Name"]);
    }

    // 列リセット不変条件: 2回目の読み込み後、選択は必ず未設定に戻る
    #[test]
    fn test_reload_resets_selection() {
        let mut session = MapSession::new();
        session
            .load_reader(Cursor::new(workbook_with_columns(&["Coords", "Name"])))
            .unwrap();
        session.set_coordinate_column(Some("Coords".to_string()));
        session.set_name_column(Some("Name".to_string()));

        session
            .load_reader(Cursor::new(workbook_with_columns(&["Lat", "Label"])))
            .unwrap();

        assert_eq!(session.selection().coordinate, None);
        assert_eq!(session.selection().name, None);
        assert_eq!(session.selection().description, None);
        assert_eq!(session.column_names(), vec!["Lat", "Label"]);
    }

    // 読み込み失敗時は以前のテーブルと選択がクリアされる
    #[test]
    fn test_failed_load_clears_previous_table() {
        let mut session = MapSession::new();
        session
            .load_reader(Cursor::new(workbook_with_columns(&["Coords", "Name"])))
            .unwrap();
        session.set_coordinate_column(Some("Coords".to_string()));

        let result = session.load_reader(Cursor::new(b"not a spreadsheet".to_vec()));
        assert!(result.is_err());
        assert!(session.table().is_none());
        assert!(session.column_names().is_empty());
        assert_eq!(session.selection().coordinate, None);
    }

    #[test]
    fn test_empty_string_selection_is_unset() {
        let mut session = MapSession::new();
        session.set_coordinate_column(Some(String::new()));
        session.set_name_column(Some("Name".to_string()));

        assert_eq!(session.selection().coordinate, None);
        assert_eq!(session.selection().name.as_deref(), Some("Name"));
    }

    #[test]
    fn test_zoom_text_is_not_validated_on_set() {
        let mut session = MapSession::new();
        session.set_zoom_text("not-a-number");
        assert_eq!(session.zoom_text(), "not-a-number");
    }
}
