//! Table Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 最初のワークシートを、名前付き列を持つインメモリテーブルとして抽出する。

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::MineralMapError;
use crate::types::CellValue;

/// 読み込み時の制限
///
/// ファイル処理時のサイズ制限を定義します。上限を超えた入力は
/// 解析前に`MineralMapError::Limit`で拒否されます。
#[derive(Debug, Clone)]
pub struct LoadLimits {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,

    /// 読み込む最大行数（ヘッダー行を除く）
    /// デフォルト: 1_000_000
    pub max_rows: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_input_file_size: 104_857_600, // 100MB
            max_rows: 1_000_000,
        }
    }
}

impl LoadLimits {
    /// デフォルトの制限を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// 標本テーブル
///
/// スプレッドシートの最初のワークシートから読み込まれた、名前付き列を持つ
/// 行の順序付きコレクションです。最初の行が列名、以降の行がデータになります。
/// ファイル選択のたびに全体が作り直され、マージされることはありません。
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::{LoadLimits, SpecimenTable};
///
/// # fn main() -> Result<(), mineralmap::MineralMapError> {
/// let table = SpecimenTable::from_path("specimens.xlsx", &LoadLimits::default())?;
/// println!("columns: {:?}", table.columns());
/// println!("rows: {}", table.row_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenTable {
    /// 列名（ヘッダー行由来、シート上の順序）
    columns: Vec<String>,

    /// データ行（各行は列数分のセル値を持つ）
    rows: Vec<Vec<CellValue>>,
}

impl SpecimenTable {
    /// ファイルパスからテーブルを読み込む
    ///
    /// # 引数
    ///
    /// * `path` - スプレッドシートファイルのパス
    /// * `limits` - 読み込み時の制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(SpecimenTable)` - 読み込みに成功した場合
    /// * `Err(MineralMapError)` - ファイルが開けない、解析に失敗した、
    ///   または制限に違反した場合
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        limits: &LoadLimits,
    ) -> Result<Self, MineralMapError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, limits)
    }

    /// リーダーからテーブルを読み込む
    ///
    /// 入力全体をメモリに読み込み、サイズ制限を確認したうえでcalamineに
    /// 渡します。XLSX/XLS/ODS形式は自動判別されます。最初のワークシート
    /// のみが対象です。
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `limits` - 読み込み時の制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(SpecimenTable)` - 読み込みに成功した場合
    /// * `Err(MineralMapError::Parse)` - ワークブックの解析に失敗した場合
    /// * `Err(MineralMapError::Limit)` - サイズ制限に違反した場合
    pub fn from_reader<R: Read + Seek>(
        mut reader: R,
        limits: &LoadLimits,
    ) -> Result<Self, MineralMapError> {
        // 入力サイズの上限を確認してからcalamineに渡す
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > limits.max_input_file_size {
            return Err(MineralMapError::Limit(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, limits.max_input_file_size
            )));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        // 最初のワークシートのみを対象とする
        let sheet_name = match workbook.sheet_names().first() {
            Some(name) => name.clone(),
            None => return Ok(Self::empty()),
        };

        let range = workbook.worksheet_range(&sheet_name)?;
        let mut row_iter = range.rows();

        // ヘッダー行を列名として取り込む
        let columns: Vec<String> = match row_iter.next() {
            Some(header) => header
                .iter()
                .map(|cell| convert_cell(cell).as_display_string())
                .collect(),
            None => return Ok(Self::empty()),
        };

        let mut rows = Vec::new();
        for raw_row in row_iter {
            if rows.len() >= limits.max_rows {
                return Err(MineralMapError::Limit(format!(
                    "Row count exceeds maximum: {} rows",
                    limits.max_rows
                )));
            }

            let mut row: Vec<CellValue> = raw_row.iter().map(convert_cell).collect();
            row.resize(columns.len(), CellValue::Empty);
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// 空のテーブルを作成
    fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// テスト・プログラム組み立て用のコンストラクタ
    ///
    /// 各行は列数に合わせて`Empty`で埋められるか、切り詰められます。
    pub fn from_parts(columns: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { columns, rows }
    }

    /// 列名のスライスを取得
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 列名から列インデックスを取得
    ///
    /// # 戻り値
    ///
    /// * `Some(index)` - 列が存在する場合
    /// * `None` - 列が存在しない場合
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// データ行のスライスを取得（テーブル順）
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// データ行数を取得
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 指定位置のセル値を取得
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// calamineのセル値をクレート内部の`CellValue`に変換
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match datetime_from_serial(dt.as_f64()) {
            Some(naive) => CellValue::DateTime(naive),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// Excelのシリアル日付値を`NaiveDateTime`に変換
///
/// 1900年システム（1899年12月30日起算）として処理します。
/// シリアル値1 = 1900年1月1日。
fn datetime_from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor() as i64;
    let seconds = ((serial - serial.floor()) * 86_400.0).round() as i64;

    epoch
        .checked_add_signed(Duration::days(days + 1))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}
