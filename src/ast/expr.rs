use super::literal::Literal;
use super::ops::{BinOp, UnOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Fst,
    Snd,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(Literal),
    Ident(String),
    ArrElem(String, Vec<Expr>),
    PairElem(PairSide, String),
    UnApp(UnOp, Box<Expr>),
    BinApp(BinOp, Box<Expr>, Box<Expr>),
    FunCall(String, Vec<Expr>),
    NewPair(Box<Expr>, Box<Expr>),
    NewStruct(String),
}
