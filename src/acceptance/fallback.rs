//! Canned readings shown when the upstream service fails.
//!
//! Every fallback is Markdown with level-2 headings, so it normalizes
//! through the heading segmenter like any prose answer.

use super::ReadingKind;

/// Subject name used when none is given.
pub const DEFAULT_NAME: &str = "Người dùng";

/// Birth date used when none is given.
pub const DEFAULT_BIRTH_DATE: &str = "01/01/2000";

/// Question used when none is given.
pub const DEFAULT_QUESTION: &str = "Câu hỏi của bạn";

const UNAVAILABLE_NOTE: &str = "Lưu ý: Đây là phân tích tạm thời do không thể kết nối với \
    dịch vụ API. Để có phân tích chi tiết và chính xác hơn, vui lòng thử lại sau.";

const NUMEROLOGY_UNAVAILABLE_NOTE: &str = "Lưu ý: Đây là phân tích thần số học tạm thời do \
    không thể kết nối với dịch vụ API. Để có phân tích chi tiết và chính xác hơn, vui lòng \
    thử lại sau.";

const TAROT_UNAVAILABLE_NOTE: &str = "Lưu ý: Đây là phân tích tạm thời do không thể kết nối \
    với dịch vụ API. Để có phân tích sâu sắc và chính xác hơn, vui lòng thử lại sau.";

// Placeholder numbers shown until the service computes the real ones.
const SOUL_NUMBER: u64 = 4;
const DESTINY_NUMBER: u64 = 2;
const PERSONALITY_NUMBER: u64 = 6;

/// A drawn tarot card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarotCard {
    /// English card name
    pub name: String,
    /// Vietnamese card name
    pub name_vi: String,
    /// Short meaning
    pub meaning: String,
}

impl TarotCard {
    /// Create a card.
    pub fn new(
        name: impl Into<String>,
        name_vi: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            name_vi: name_vi.into(),
            meaning: meaning.into(),
        }
    }

    fn magician() -> Self {
        Self::new(
            "The Magician",
            "Nhà Ảo Thuật",
            "Sức mạnh ý chí, sự sáng tạo và khả năng biến ước mơ thành hiện thực.",
        )
    }

    fn chariot() -> Self {
        Self::new("The Chariot", "Cỗ Xe", "Quyết tâm, ý chí mạnh mẽ và chiến thắng.")
    }

    fn star() -> Self {
        Self::new("The Star", "Ngôi Sao", "Hy vọng, cảm hứng và sự bình yên tâm hồn.")
    }
}

/// Three-card spread layouts, by the letter the request form uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TarotSpread {
    /// Past / present / future
    #[default]
    A,
    /// Situation / action / outcome
    B,
    /// Strength / challenge / advice
    C,
    /// Desire / obstacle / reconciliation
    D,
    /// Mind / body / spirit
    E,
    /// Nature / root cause / resolution
    F,
    /// Strengths / weaknesses / advice
    G,
    /// Want / obstacle / how to get there
    H,
}

impl TarotSpread {
    /// Parse the form letter; unknown letters yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "a" => Some(TarotSpread::A),
            "b" => Some(TarotSpread::B),
            "c" => Some(TarotSpread::C),
            "d" => Some(TarotSpread::D),
            "e" => Some(TarotSpread::E),
            "f" => Some(TarotSpread::F),
            "g" => Some(TarotSpread::G),
            "h" => Some(TarotSpread::H),
            _ => None,
        }
    }

    /// Position names joined with ` / `.
    pub fn description(&self) -> &'static str {
        match self {
            TarotSpread::A => "Quá khứ / Hiện tại / Tương lai",
            TarotSpread::B => "Tình huống hiện tại / Hành động cần làm / Kết quả",
            TarotSpread::C => "Điểm mạnh của bạn / Thách thức chính / Lời khuyên",
            TarotSpread::D => "Điều bạn mong muốn / Điều đang cản trở / Cách dung hòa/vượt qua",
            TarotSpread::E => {
                "Tâm trí (Suy nghĩ) / Cơ thể (Hành động) / Tinh thần (Cảm xúc/Trực giác)"
            }
            TarotSpread::F => "Bản chất vấn đề / Nguyên nhân gốc rễ / Hướng giải quyết",
            TarotSpread::G => "Điểm mạnh / Điểm yếu / Lời khuyên",
            TarotSpread::H => "Bạn muốn gì / Điều gì cản trở / Làm thế nào để đạt được",
        }
    }

    /// The three position names.
    pub fn positions(&self) -> Vec<&'static str> {
        self.description().split(" / ").collect()
    }

    fn interpretation(&self, position: usize) -> &'static str {
        let lines: [&str; 3] = match self {
            TarotSpread::A => [
                "những trải nghiệm trong quá khứ đã ảnh hưởng đến tình huống hiện tại của bạn",
                "năng lượng đang bao quanh bạn ở thời điểm hiện tại",
                "một khả năng có thể xảy ra trong tương lai nếu bạn tiếp tục con đường hiện tại",
            ],
            TarotSpread::B => [
                "bản chất của tình huống bạn đang đối mặt",
                "hành động hoặc thái độ bạn nên thực hiện để đạt kết quả tốt nhất",
                "kết quả tiềm năng nếu bạn áp dụng lời khuyên từ lá bài thứ hai",
            ],
            TarotSpread::C => [
                "điểm mạnh hoặc nguồn lực bạn có thể tận dụng",
                "thách thức chính bạn đang đối mặt trong tình huống này",
                "cách tốt nhất để vượt qua thách thức và tận dụng điểm mạnh của bạn",
            ],
            _ => [
                "yếu tố quan trọng đầu tiên bạn cần xem xét",
                "yếu tố thứ hai bạn cần cân nhắc",
                "giải pháp hoặc kết quả cuối cùng cho tình huống",
            ],
        };
        lines
            .get(position)
            .copied()
            .unwrap_or("một khía cạnh quan trọng đáng suy ngẫm")
    }
}

/// Who or what a reading is about.
///
/// Astrology and numerology readings use the name and birth date; tarot
/// readings use the question, the drawn cards and the spread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    /// Display name
    pub name: Option<String>,
    /// Birth date as entered (dd/mm/yyyy)
    pub birth_date: Option<String>,
    /// Question asked of the cards
    pub question: Option<String>,
    /// Drawn cards in position order
    pub cards: Vec<TarotCard>,
    /// Three-card spread layout
    pub spread: TarotSpread,
}

impl Subject {
    /// Create an anonymous subject.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the birth date.
    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    /// Set the tarot question.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Add a drawn card.
    pub fn with_card(mut self, card: TarotCard) -> Self {
        self.cards.push(card);
        self
    }

    /// Set the spread layout.
    pub fn with_spread(mut self, spread: TarotSpread) -> Self {
        self.spread = spread;
        self
    }

    /// Name to display, falling back to [`DEFAULT_NAME`].
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(DEFAULT_NAME)
    }

    /// Birth date to display, falling back to [`DEFAULT_BIRTH_DATE`].
    pub fn display_birth_date(&self) -> &str {
        non_blank(self.birth_date.as_deref()).unwrap_or(DEFAULT_BIRTH_DATE)
    }

    /// Question to display, falling back to [`DEFAULT_QUESTION`].
    pub fn display_question(&self) -> &str {
        non_blank(self.question.as_deref()).unwrap_or(DEFAULT_QUESTION)
    }

    /// First drawn card, or The Magician.
    fn single_card(&self) -> TarotCard {
        self.cards.first().cloned().unwrap_or_else(TarotCard::magician)
    }

    /// First three drawn cards, or the default spread when fewer were drawn.
    fn three_cards(&self) -> [TarotCard; 3] {
        match self.cards.as_slice() {
            [first, second, third, ..] => [first.clone(), second.clone(), third.clone()],
            _ => [TarotCard::magician(), TarotCard::chariot(), TarotCard::star()],
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Canned Markdown reading shown when the upstream service fails.
pub fn fallback_reading(kind: ReadingKind, subject: &Subject) -> String {
    match kind {
        ReadingKind::Basic => astrology(subject),
        ReadingKind::Detailed => astrology_detailed(subject),
        ReadingKind::Numerology => numerology(subject),
        ReadingKind::TarotSingleCard => tarot_single_card(subject),
        ReadingKind::TarotThreeCards => tarot_three_cards(subject),
    }
}

fn astrology(subject: &Subject) -> String {
    let name = subject.display_name();
    let birth_date = subject.display_birth_date();

    format!(
        "# Phân tích Tử Vi cho {name}\n\
         \n\
         ## Thông tin cơ bản\n\
         - Họ và Tên: {name}\n\
         - Ngày Sinh: {birth_date}\n\
         \n\
         ## Giới hạn phân tích\n\
         Chúng tôi không thể kết nối với dịch vụ phân tích tử vi vào lúc này. \
         Vui lòng thử lại sau để nhận phân tích chính xác hơn.\n\
         \n\
         ## Một số thông tin sơ bộ\n\
         Dựa trên ngày sinh của bạn, một số đặc điểm chung có thể được nhận định. \
         Tuy nhiên, phân tích chi tiết và chính xác hơn sẽ được cung cấp khi kết nối \
         với hệ thống thành công.\n\
         \n\
         *{UNAVAILABLE_NOTE}*\n"
    )
}

fn astrology_detailed(subject: &Subject) -> String {
    let name = subject.display_name();
    let birth_date = subject.display_birth_date();

    format!(
        "# Phân tích Tử Vi Chi Tiết cho {name}\n\
         \n\
         ## Thông tin cơ bản\n\
         - Họ và Tên: {name}\n\
         - Ngày Sinh: {birth_date}\n\
         \n\
         ## Giới hạn phân tích\n\
         Chúng tôi không thể kết nối với dịch vụ phân tích tử vi chi tiết vào lúc này. \
         Vui lòng thử lại sau để nhận phân tích chính xác hơn.\n\
         \n\
         ## Chuyển đổi Lịch và Xác định Can Chi\n\
         Dựa trên ngày {birth_date}, một số đặc điểm chung có thể được nhận định. \
         Tuy nhiên, phân tích chi tiết sẽ được cung cấp khi kết nối với hệ thống thành công.\n\
         \n\
         ## Nạp Âm và Âm Dương Nam/Nữ\n\
         Thông tin này sẽ được cung cấp khi kết nối thành công.\n\
         \n\
         ## Các Yếu Tố Cố Định Theo Năm Sinh\n\
         Thông tin này sẽ được cung cấp khi kết nối thành công.\n\
         \n\
         ## Giới Hạn Do Thiếu Thông Tin\n\
         Phân tích chi tiết và chính xác hơn sẽ được cung cấp khi kết nối với hệ thống \
         thành công.\n\
         \n\
         *{UNAVAILABLE_NOTE}*\n"
    )
}

fn numerology(subject: &Subject) -> String {
    let name = subject.display_name();
    let birth_date = subject.display_birth_date();
    let life_path = rough_life_path(birth_date);

    format!(
        "# Phân tích Thần Số Học cho {name}\n\
         \n\
         ## Thông tin cơ bản\n\
         - Họ và Tên: {name}\n\
         - Ngày Sinh: {birth_date}\n\
         \n\
         ## Con Số Đường Đời: {life_path}\n\
         \n\
         Con số đường đời {life_path} của bạn thể hiện con đường và mục đích sống cốt lõi. \
         Đây là con số quan trọng nhất trong biểu đồ thần số học của bạn.\n\
         \n\
         ## Con Số Linh Hồn: {SOUL_NUMBER}\n\
         \n\
         Con số linh hồn {SOUL_NUMBER} thể hiện những khao khát sâu thẳm và những gì làm \
         bạn thực sự hạnh phúc. Đây là động lực bên trong thúc đẩy bạn.\n\
         \n\
         ## Con Số Sứ Mệnh: {DESTINY_NUMBER}\n\
         \n\
         Con số sứ mệnh {DESTINY_NUMBER} thể hiện những tài năng và khả năng bạn mang theo \
         khi sinh ra. Đây là con đường mà bạn được định sẵn để theo đuổi.\n\
         \n\
         ## Con Số Nhân Cách: {PERSONALITY_NUMBER}\n\
         \n\
         Con số nhân cách {PERSONALITY_NUMBER} thể hiện hình ảnh bên ngoài mà bạn thể hiện \
         với thế giới. Đây là cách người khác nhìn nhận bạn.\n\
         \n\
         ---\n\
         \n\
         *{NUMEROLOGY_UNAVAILABLE_NOTE}*\n"
    )
}

/// Life path estimate from day + month + year, folded while above 9.
///
/// Master numbers 11 and 22 are kept. Each fold adds the last digit to the
/// rest of the number, so this is not a full digit sum.
fn rough_life_path(birth_date: &str) -> u64 {
    let mut parts = birth_date.split('/').map(leading_number);
    let day = parts.next().unwrap_or(0);
    let month = parts.next().unwrap_or(0);
    let year = parts.next().unwrap_or(0);

    let mut number = day.saturating_add(month).saturating_add(year);
    while number > 9 && number != 11 && number != 22 {
        number = number / 10 + number % 10;
    }
    number
}

/// Leading decimal digits of a date part; anything else counts as zero.
fn leading_number(part: &str) -> u64 {
    let part = part.trim();
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().unwrap_or(0)
}

fn tarot_single_card(subject: &Subject) -> String {
    let question = subject.display_question();
    let card = subject.single_card();

    format!(
        "# Phân tích lá bài {name} ({name_vi})\n\
         \n\
         ## Câu hỏi của bạn\n\
         \"{question}\"\n\
         \n\
         ## Ý nghĩa lá bài\n\
         {meaning}\n\
         \n\
         ## Liên hệ với câu hỏi\n\
         Lá bài {name_vi} xuất hiện trong bối cảnh câu hỏi của bạn cho thấy đây là thời điểm \
         bạn cần tận dụng sức mạnh nội tại và khả năng sáng tạo của mình. Hãy nhìn nhận tình \
         huống hiện tại với niềm tin vào khả năng biến những điều bạn mong muốn thành hiện thực.\n\
         \n\
         ## Lời khuyên\n\
         Hãy tin tưởng vào khả năng của chính mình. Đây là thời điểm tốt để bạn chủ động tạo \
         ra cơ hội thay vì chờ đợi cơ hội đến. Hãy nhận diện và khai thác những công cụ, nguồn \
         lực sẵn có xung quanh bạn.\n\
         \n\
         *{TAROT_UNAVAILABLE_NOTE}*\n",
        name = card.name,
        name_vi = card.name_vi,
        meaning = card.meaning,
    )
}

fn tarot_three_cards(subject: &Subject) -> String {
    let question = subject.display_question();
    let spread = subject.spread;
    let cards = subject.three_cards();
    let positions = spread.positions();

    let mut text = format!(
        "# Phân tích Trải Bài Tarot 3 Lá\n\
         \n\
         ## Câu hỏi của bạn\n\
         \"{question}\"\n\
         \n\
         ## Loại trải bài\n\
         {description}\n\
         \n\
         ## Tổng quan\n\
         Bộ ba lá bài này tạo nên một câu chuyện về hành trình của bạn liên quan đến câu hỏi \
         đã đặt ra. Hãy cùng khám phá ý nghĩa của từng lá bài và mối liên hệ giữa chúng.\n\
         \n",
        description = spread.description(),
    );

    let links = ["cho thấy", "đại diện cho", "gợi ý rằng"];
    for (index, card) in cards.iter().enumerate() {
        let position = positions.get(index).copied().unwrap_or_default();
        text.push_str(&format!(
            "## {position}: {name} ({name_vi})\n\
             {meaning}\n\
             \n\
             Ở vị trí {lower}, lá {name_vi} {link} {interpretation}.\n\
             \n",
            name = card.name,
            name_vi = card.name_vi,
            meaning = card.meaning,
            lower = position.to_lowercase(),
            link = links[index],
            interpretation = spread.interpretation(index),
        ));
    }

    text.push_str(&format!(
        "## Mối liên hệ giữa các lá bài\n\
         Ba lá bài này cùng nhau tạo nên một câu chuyện về sự phát triển. Từ {first} đến \
         {second} và cuối cùng là {third}, bạn có thể thấy một tiến trình rõ ràng từ khởi đầu \
         đến kết quả cuối cùng.\n\
         \n\
         ## Thông điệp tổng thể\n\
         Thông điệp chính từ trải bài này là bạn đang trong quá trình phát triển và chuyển \
         đổi. Hãy tin tưởng vào con đường bạn đang đi và tận dụng những nguồn lực sẵn có để \
         đạt được mục tiêu của mình.\n\
         \n\
         *{TAROT_UNAVAILABLE_NOTE}*\n",
        first = cards[0].name_vi,
        second = cards[1].name_vi,
        third = cards[2].name_vi,
    ));
    text
}
