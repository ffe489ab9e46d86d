//! Reading material catalog and text value types

/// Broad category a reading text belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Fiction,
    NonFiction,
    Drill,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-fiction",
            Category::Drill => "Drill",
        }
    }
}

/// An immutable reading text, either built-in or user-entered.
///
/// `chunks`, when present, are hand-prepared display units and take
/// precedence over automatic chunking. They may carry `/` sub-boundary
/// markers which are stripped for display.
#[derive(Clone, Debug)]
pub struct ReadingText {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub content: String,
    pub chunks: Option<Vec<String>>,
    pub word_count: usize,
}

impl ReadingText {
    fn builtin(
        id: &str,
        title: &str,
        category: Category,
        content: &str,
        chunks: Option<&[&str]>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            content: content.to_string(),
            chunks: chunks.map(|cs| cs.iter().map(|c| c.to_string()).collect()),
            word_count: content.chars().count(),
        }
    }

    /// Build a text from user-entered content. Word count is the
    /// character count, which is the unit for Chinese reading material.
    pub fn custom(content: String) -> Self {
        let word_count = content.chars().count();
        Self {
            id: "custom".to_string(),
            title: "Custom text".to_string(),
            category: Category::Drill,
            content,
            chunks: None,
            word_count,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id == "custom"
    }
}

/// The built-in reading materials, in picker order.
pub fn materials() -> Vec<ReadingText> {
    vec![
        ReadingText::builtin(
            "chameleon",
            "变色龙的一天",
            Category::Fiction,
            "清晨的阳光穿过树叶，落在一只变色龙身上。它趴在枝头一动不动，\
             皮肤慢慢染上了叶子的绿色。一只飞虫停在不远处，变色龙的眼睛悄悄转了过去，\
             舌头闪电般弹出，又迅速缩回。树林恢复了安静，仿佛什么都没有发生过。",
            None,
        ),
        ReadingText::builtin(
            "bamboo",
            "竹林晨光",
            Category::Fiction,
            "雨后的竹林格外清新，笋尖顶开泥土，沾着晶亮的水珠。风从山谷吹来，\
             竹叶沙沙作响，像一场轻声的合唱。远处传来几声鸟鸣，\
             一位老人背着竹篓慢慢走过小径，脚步声很快消失在绿色深处。",
            None,
        ),
        ReadingText::builtin(
            "dinosaur",
            "恐龙为何消失",
            Category::NonFiction,
            "六千六百万年前，一颗小行星撞击了地球。巨大的尘埃云遮住阳光，\
             植物大面积枯死，食物链随之崩溃。统治地球一亿多年的恐龙没有熬过这场灾难，\
             只有一部分长羽毛的小型恐龙幸存下来，它们的后代就是今天的鸟类。",
            None,
        ),
        ReadingText::builtin(
            "stars",
            "仰望星空",
            Category::NonFiction,
            "夜空中肉眼可见的星星大约有几千颗，它们几乎都是银河系里的恒星。\
             星光到达地球往往需要几十年甚至上千年，我们看到的其实是星星过去的样子。\
             从这个意义上说，仰望星空就是在回望宇宙的历史。",
            None,
        ),
        ReadingText::builtin(
            "chunk-rhythm",
            "意群节奏练习",
            Category::Drill,
            "快速阅读不是逐字扫描，而是一组一组地捕捉意义。眼睛每停一次，\
             就摄取一个完整的意群。练习的目标，是让每次注视覆盖更多的文字。",
            Some(&[
                "快速阅读/不是",
                "逐字扫描，",
                "而是/一组一组地",
                "捕捉意义。",
                "眼睛/每停一次，",
                "就摄取/一个",
                "完整的意群。",
                "练习的目标，",
                "是让/每次注视",
                "覆盖/更多的文字。",
            ]),
        ),
    ]
}

/// Look up a built-in material by id.
pub fn material(id: &str) -> Option<ReadingText> {
    materials().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_matches_character_count() {
        for text in materials() {
            assert_eq!(text.word_count, text.content.chars().count());
        }
    }

    #[test]
    fn material_ids_are_unique() {
        let all = materials();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn custom_text_counts_characters_not_bytes() {
        let text = ReadingText::custom("你好世界".to_string());
        assert_eq!(text.word_count, 4);
        assert!(text.is_custom());
        assert!(text.chunks.is_none());
    }

    #[test]
    fn precomputed_chunks_cover_content() {
        let drill = material("chunk-rhythm").unwrap();
        let chunks = drill.chunks.unwrap();
        let joined: String = chunks.join("").replace('/', "");
        assert_eq!(joined, drill.content);
    }
}
