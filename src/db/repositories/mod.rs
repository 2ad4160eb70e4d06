mod games;
mod thoughts;
