//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! セル値、マーカーレコード、列選択、および座標文字列の解析を提供する。

use chrono::NaiveDateTime;
use serde::Serialize;

/// セルの値を表す列挙型
///
/// スプレッドシートの1セルの値を型付きで保持します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時値
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値を表示用の文字列として取得
    ///
    /// 座標セルの解析やポップアップの組み立ては、すべてこの表現を入力とします。
    ///
    /// - 数値: 整数値であれば小数部なしで出力（`3.0` -> `"3"`）
    /// - 日時: 時刻が0時0分0秒の場合は日付のみ（ISO 8601形式）
    /// - 論理値: `TRUE` / `FALSE`
    /// - 空セル: 空文字列
    pub fn as_display_string(&self) -> String {
        match self {
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

/// マップ上の1マーカーを表すレコード
///
/// 検証済みの1行から導出される一時的なデータで、永続化されません。
/// `Serialize`を実装しており、マップドキュメントへはJSON配列として
/// 埋め込まれます。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    /// 緯度
    pub lat: f64,

    /// 経度
    pub lon: f64,

    /// 表示名（名前列のセル値）
    pub label: String,

    /// 説明文（説明列のセル値。列が未選択の場合は空文字列）
    pub description: String,
}

impl MarkerRecord {
    /// ポップアップのHTML断片を構築
    ///
    /// 名前を太字ラベルとして、その下に説明を配置します。
    /// セル由来のテキストはHTMLエスケープされるため、セルの内容が
    /// 生成されたページの構造を壊すことはありません。
    pub fn popup_html(&self) -> String {
        format!(
            "<b>{}</b><br>{}",
            escape_html(&self.label),
            escape_html(&self.description)
        )
    }
}

/// 列選択の状態
///
/// 座標列と名前列は必須、説明列は任意です。各選択は未設定（`None`）か、
/// 現在のテーブルの列名のいずれかです。新しいテーブルを読み込むと
/// すべての選択はリセットされます。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSelection {
    /// 座標列（「緯度,経度」形式の文字列を含む列）
    pub coordinate: Option<String>,

    /// 名前列
    pub name: Option<String>,

    /// 説明列（任意）
    pub description: Option<String>,
}

impl ColumnSelection {
    /// すべての選択を未設定に戻す
    pub fn clear(&mut self) {
        self.coordinate = None;
        self.name = None;
        self.description = None;
    }

    /// 選択済みの列名をすべて返す（存在チェック用）
    pub fn selected_names(&self) -> Vec<&str> {
        [&self.coordinate, &self.name, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// 座標文字列を（緯度, 経度）に解析
///
/// 文字列をカンマで分割し、ちょうど2つの部分文字列が得られ、かつ両方が
/// 浮動小数点数として解析できた場合のみ成功します。各部分の前後の空白は
/// 無視されます。
///
/// # 引数
///
/// * `raw` - 座標セルの生のテキスト（例: `"35.68, 139.69"`）
///
/// # 戻り値
///
/// * `Some((lat, lon))` - 解析に成功した場合
/// * `None` - 部分の数が2でない、または数値として解析できない場合
pub fn parse_coordinate(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return None;
    }

    let lat = parts[0].trim().parse::<f64>().ok()?;
    let lon = parts[1].trim().parse::<f64>().ok()?;
    Some((lat, lon))
}

/// HTML特殊文字をエスケープ
pub(crate) fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
