//! Player-facing text with a locale lookup that falls back to English and
//! then to the key itself.

use std::collections::HashMap;

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("initialScreen.title", "Elevator Math Mania!"),
    ("initialScreen.description", "Help the monkey reach the target floor using math!"),
    ("initialScreen.startGame", "Start Game"),
    ("gameOverScreen.title", "Game Over!"),
    ("gameOverScreen.yourFinalScore", "Your Final Score: {score}"),
    (
        "gameOverScreen.answeredCorrectly",
        "You answered {correctCount} out of {totalQuestions} questions correctly.",
    ),
    ("gameOverScreen.playAgain", "Play Again"),
    ("problemStatement.loading", "Loading problem..."),
    (
        "problemStatement.monkeyWantsToGo",
        "Monkey at Floor {startFloor} wants to go to Floor {targetFloor}",
    ),
    ("scoreboard.score", "Score: {score}"),
    ("scoreboard.difficulty", "Difficulty: {difficulty}"),
    ("scoreboard.question", "Question: {questionNumber} / {totalQuestions}"),
    ("controls.operatorPrompt", "Choose an operation (+ or -)."),
    ("controls.numberPrompt", "Choose how many floors (1-10)."),
    ("controls.elevatorMoving", "Elevator moving..."),
    ("controls.monkeyHappy", "Monkey is happy!"),
    ("controls.monkeyConfused", "Monkey is confused..."),
    ("controls.monkeyGettingReady", "Monkey is getting ready..."),
    ("controls.submit", "Submit"),
    ("cli.commands", "Commands: + - 1..10 ok new quit"),
    ("cli.startHint", "Type 'new' to {action}."),
    ("cli.arrived", "The elevator stops at floor {floor}."),
    ("cli.notNow", "That doesn't work right now."),
    ("cli.unknown", "Unknown command: {input}"),
    ("cli.journal", "Journal: {path}"),
];

const ZH: Table = &[
    ("initialScreen.title", "电梯数学大挑战！"),
    ("initialScreen.description", "帮助猴子用数学到达目标楼层！"),
    ("initialScreen.startGame", "开始游戏"),
    ("gameOverScreen.title", "游戏结束！"),
    ("gameOverScreen.yourFinalScore", "你的最终得分：{score}"),
    (
        "gameOverScreen.answeredCorrectly",
        "你答对了 {totalQuestions} 道题中的 {correctCount} 道。",
    ),
    ("gameOverScreen.playAgain", "再玩一次"),
    ("problemStatement.loading", "正在加载题目..."),
    ("problemStatement.monkeyWantsToGo", "猴子在 {startFloor} 楼，想去 {targetFloor} 楼"),
    ("scoreboard.score", "得分：{score}"),
    ("scoreboard.difficulty", "难度：{difficulty}"),
    ("scoreboard.question", "问题：{questionNumber} / {totalQuestions}"),
    ("controls.operatorPrompt", "选择一个运算符号（+ 或 -）。"),
    ("controls.numberPrompt", "选择移动的楼层数（1-10）。"),
    ("controls.elevatorMoving", "电梯运行中..."),
    ("controls.monkeyHappy", "猴子很开心！"),
    ("controls.monkeyConfused", "猴子很困惑..."),
    ("controls.monkeyGettingReady", "猴子准备中..."),
    ("controls.submit", "提交"),
    ("cli.commands", "命令：+ - 1..10 ok new quit"),
    ("cli.startHint", "输入 'new' {action}。"),
    ("cli.arrived", "电梯停在 {floor} 楼。"),
    ("cli.notNow", "现在不能这样做。"),
];

impl Locale {
    fn table(self) -> Table {
        match self {
            Self::En => EN,
            Self::Zh => ZH,
        }
    }
}

pub struct Catalog {
    primary: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self::from_tables(locale.table(), EN)
    }

    fn from_tables(primary: Table, fallback: Table) -> Self {
        Self {
            primary: primary.iter().copied().collect(),
            fallback: fallback.iter().copied().collect(),
        }
    }

    /// Looks `key` up and fills each `{name}` placeholder from `args`.
    /// Unknown keys come back verbatim.
    pub fn text(&self, key: &str, args: &[(&str, &dyn ToString)]) -> String {
        let template = self.primary.get(key).or_else(|| self.fallback.get(key)).copied();
        let Some(template) = template else {
            return key.to_string();
        };
        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), &value.to_string())
        })
    }

    pub fn get(&self, key: &str) -> String {
        self.text(key, &[])
    }
}
