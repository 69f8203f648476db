pub mod wordfreq;
