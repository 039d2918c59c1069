//! Da-Chen (standard) Zhuyin keyboard layout and a small syllable table.
//!
//! Keys map to Bopomofo symbols in one of four slots. A syllable is complete
//! once a tone key (or space, for the first tone) is pressed.

use phf::phf_map;

/// Position of a Bopomofo symbol inside a syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Initial,
    Medial,
    Final,
    Tone,
}

pub static DACHEN: phf::Map<char, char> = phf_map! {
    '1' => 'ㄅ', 'q' => 'ㄆ', 'a' => 'ㄇ', 'z' => 'ㄈ',
    '2' => 'ㄉ', 'w' => 'ㄊ', 's' => 'ㄋ', 'x' => 'ㄌ',
    'e' => 'ㄍ', 'd' => 'ㄎ', 'c' => 'ㄏ',
    'r' => 'ㄐ', 'f' => 'ㄑ', 'v' => 'ㄒ',
    '5' => 'ㄓ', 't' => 'ㄔ', 'g' => 'ㄕ', 'b' => 'ㄖ',
    'y' => 'ㄗ', 'h' => 'ㄘ', 'n' => 'ㄙ',
    'u' => 'ㄧ', 'j' => 'ㄨ', 'm' => 'ㄩ',
    '8' => 'ㄚ', 'i' => 'ㄛ', 'k' => 'ㄜ', ',' => 'ㄝ',
    '9' => 'ㄞ', 'o' => 'ㄟ', 'l' => 'ㄠ', '.' => 'ㄡ',
    '0' => 'ㄢ', 'p' => 'ㄣ', ';' => 'ㄤ', '/' => 'ㄥ', '-' => 'ㄦ',
    '3' => 'ˇ', '4' => 'ˋ', '6' => 'ˊ', '7' => '˙',
};

/// Slot of a Bopomofo symbol.
pub fn slot_of(symbol: char) -> Slot {
    match symbol {
        'ㄧ' | 'ㄨ' | 'ㄩ' => Slot::Medial,
        'ㄚ'..='ㄦ' => Slot::Final,
        'ˇ' | 'ˋ' | 'ˊ' | '˙' => Slot::Tone,
        _ => Slot::Initial,
    }
}

/// Bopomofo symbol and slot for a key on the Da-Chen layout.
pub fn lookup(key: char) -> Option<(Slot, char)> {
    DACHEN.get(&key).map(|&symbol| (slot_of(symbol), symbol))
}

/// Space separated candidates per syllable, first tone written without a mark.
static PHRASES: phf::Map<&'static str, &'static str> = phf_map! {
    "ㄅㄚ" => "八 巴 吧 疤",
    "ㄘㄜˋ" => "測 策 側 廁 冊",
    "ㄕˋ" => "是 事 試 市 式 室 世 示 視 士 釋 氏",
    "ㄋㄧˇ" => "你 妳 擬 祢",
    "ㄏㄠˇ" => "好 郝",
    "ㄓㄨㄥ" => "中 鐘 終 忠 鍾",
    "ㄨㄣˊ" => "文 聞 紋 蚊",
    "ㄊㄞˊ" => "台 臺 抬 颱",
    "ㄨㄢ" => "灣 彎 豌",
    "ㄉㄜ˙" => "的",
    "ㄒㄧㄝˋ" => "謝 洩 卸 械",
    "ㄒㄧㄝ˙" => "謝",
    "ㄨㄛˇ" => "我",
    "ㄇㄣ˙" => "們",
    "ㄖㄣˊ" => "人 仁 壬",
    "ㄉㄚˋ" => "大",
    "ㄐㄧㄚ" => "家 加 佳 嘉",
};

/// Candidates for a complete syllable, most likely first.
pub fn candidates(syllable: &str) -> Vec<&'static str> {
    PHRASES
        .get(syllable)
        .map(|list| list.split_whitespace().collect())
        .unwrap_or_default()
}
