pub mod goodreads_rss;
