/// 随机源. 所有需要随机数的运算都显式接收一个`Rand`, 而不是依赖进程全局的随机状态.
pub trait Rand {
    fn rand(&mut self, random: &mut [u8]);
}

mod default_rand;
pub use default_rand::DefaultRand;

mod seeded_rand;
pub use seeded_rand::SeededRand;

impl<R: Rand + ?Sized> Rand for &mut R {
    fn rand(&mut self, random: &mut [u8]) {
        (**self).rand(random)
    }
}

impl<R: Rand + ?Sized> Rand for Box<R> {
    fn rand(&mut self, random: &mut [u8]) {
        (**self).rand(random)
    }
}
