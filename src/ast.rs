use crate::ops::BinOp;
use std::fmt;

/// 표현식을 구성하는 AST 노드들.
/// 식별자는 파싱 시점이 아니라 평가 시점에 이름으로 해석됩니다.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// 숫자 리터럴 (예: 1, 3.14)
    Num(f64),
    /// 변수 또는 상수 참조 (예: x, pi)
    Var(String),
    /// 단항 음수 (예: -x)
    Neg(Box<Ast>),
    /// 이항 연산 (a + b, a - b, a * b, a / b, a ^ b)
    Binary(BinOp, Box<Ast>, Box<Ast>),
    /// 함수 호출 name(args..). 인자는 왼쪽부터 차례로 평가됩니다.
    Call { name: String, args: Vec<Ast> },
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Num(v) => write!(f, "{}", v),
            Ast::Var(s) => f.write_str(s),
            Ast::Neg(x) => write!(f, "(-{})", x),
            Ast::Binary(op, a, b) => write!(f, "({} {} {})", a, op, b),
            Ast::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                f.write_str(")")
            }
        }
    }
}
